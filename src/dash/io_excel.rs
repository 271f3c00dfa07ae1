use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::dash::{io_common::clean_headers, *};

/// Reads a worksheet of a workbook. The first row holds the column names.
pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> BDashResult<RawTable> {
    let wrange = get_range(path, worksheet_name)?;
    range_to_table(path, &wrange)
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> BDashResult<Range<DataType>> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

fn range_to_table(path: &str, wrange: &Range<DataType>) -> BDashResult<RawTable> {
    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    debug!("read_excel_table: header: {:?}", header);
    let headers = clean_headers(path, header.iter().map(cell_to_string).collect())?;

    let rows: Vec<Vec<String>> = iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    debug!("read_excel_table: {} rows", rows.len());
    Ok(RawTable { headers, rows })
}

// Whole numbers stored as floats are written without the decimal part.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{:.0}", f),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        // Dates and cell errors never hold a usable value for the results table.
        other => format!("{:?}", other),
    }
}
