// Primitives for reading CSV files.

use std::fs::File;
use std::io::Read;

use crate::tabulate::{
    io_common::{make_grid, parse_score},
    *,
};

pub fn read_csv_file(path: &str, first_row: usize, first_col: usize) -> TabulateResult<Grid> {
    let file = File::open(path).context(CsvOpenSnafu { path })?;
    read_csv_table(csv_reader(file), first_row, first_col)
}

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    // Short rows are reported by the grid with a clearer message than the csv crate.
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr)
}

/// Reads the scores, starting at the record `first_row` and the column `first_col`
/// (both 1-based).
pub fn read_csv_table<R: Read>(
    rdr: csv::Reader<R>,
    first_row: usize,
    first_col: usize,
) -> TabulateResult<Grid> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        if lineno < first_row {
            continue;
        }
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let mut row: Vec<f64> = Vec::new();
        for cell in line.iter().skip(first_col.saturating_sub(1)) {
            let score = parse_score(cell).context(CsvWrongCellSnafu {
                lineno,
                content: cell.to_string(),
            })?;
            row.push(score);
        }
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, &row);
        rows.push(row);
    }
    make_grid(rows)
}
