use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::tabulate::{io_common::make_grid, *};

pub fn read_excel_file(
    path: &str,
    worksheet_name: Option<&str>,
    first_row: usize,
    first_col: usize,
) -> TabulateResult<Grid> {
    let wrange = get_range(path, worksheet_name)?;
    range_to_grid(&wrange, first_row, first_col)
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> TabulateResult<Range<DataType>> {
    debug!(
        "read_excel_file: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    };
    wrange
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })
}

/// Converts a worksheet into a grid. `first_row` and `first_col` are the 1-based
/// spreadsheet coordinates of the first score, whatever the used area of the sheet.
fn range_to_grid(
    wrange: &Range<DataType>,
    first_row: usize,
    first_col: usize,
) -> TabulateResult<Grid> {
    let (start_row, start_col) = wrange.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let lineno = start_row as usize + idx + 1;
        if lineno < first_row {
            continue;
        }
        let mut values: Vec<f64> = Vec::new();
        for (jdx, cell) in row.iter().enumerate() {
            if (start_col as usize + jdx + 1) < first_col {
                continue;
            }
            let value = read_cell(cell).context(ExcelWrongCellTypeSnafu {
                lineno,
                content: format!("{:?}", cell),
            })?;
            values.push(value);
        }
        debug!("range_to_grid: lineno: {:?} row: {:?}", lineno, &values);
        rows.push(values);
    }
    make_grid(rows)
}

fn read_cell(cell: &DataType) -> Option<f64> {
    match cell {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        DataType::Empty => Some(0.0),
        _ => None,
    }
}
