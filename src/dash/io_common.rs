use snafu::whatever;
use std::path::Path;

use crate::dash::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Cleans the header row coming out of a reader.
///
/// Spreadsheets exported on Windows often start with a byte order mark, which
/// would otherwise stick to the first column name.
pub fn clean_headers(path: &str, headers: Vec<String>) -> DashResult<Vec<String>> {
    if headers.iter().all(|h| h.trim().is_empty()) {
        whatever!(
            "The first row of {} is empty, expected the column names",
            simplify_file_name(path)
        );
    }
    Ok(headers
        .into_iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h
            }
        })
        .collect())
}
