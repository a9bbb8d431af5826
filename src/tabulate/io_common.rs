use std::path::Path;

use crate::tabulate::*;

/// The file name without directory and extension, used as a default contest name.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Reads a score from a text cell. Blank cells count as 0.
pub fn parse_score(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    t.parse::<f64>().ok().filter(|x| x.is_finite())
}

pub fn make_grid(rows: Vec<Vec<f64>>) -> TabulateResult<Grid> {
    debug!("make_grid: {} rows", rows.len());
    Grid::new(rows).context(VotingSnafu {})
}
