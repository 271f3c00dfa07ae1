// Primitives for reading CSV files.

use std::io::Read;

use crate::dash::{io_common::clean_headers, *};

pub fn read_csv_table(path: &str) -> BDashResult<RawTable> {
    let rdr = csv_builder().from_path(path).context(CsvOpenSnafu { path })?;
    read_records(path, rdr)
}

pub fn read_csv_table_from<R: Read>(name: &str, input: R) -> BDashResult<RawTable> {
    read_records(name, csv_builder().from_reader(input))
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Short rows are kept, the dataset drops them if a needed cell is missing.
    builder.has_headers(true).flexible(true);
    builder
}

fn read_records<R: Read>(path: &str, mut rdr: csv::Reader<R>) -> BDashResult<RawTable> {
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvHeaderSnafu {})?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!("read_csv_table: headers: {:?}", headers);
    let headers = clean_headers(path, headers)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    debug!("read_csv_table: {} rows", rows.len());
    Ok(RawTable { headers, rows })
}
