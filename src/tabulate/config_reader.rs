use crate::tabulate::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

/// The header of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub rule: String,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: String,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    // Numbers or strings are accepted.
    #[serde(rename = "firstVoteRowIndex")]
    pub first_vote_row_index: Option<JSValue>,
    #[serde(rename = "firstVoteColumnIndex")]
    pub first_vote_column_index: Option<JSValue>,
}

impl InputSource {
    /// The first row holding scores, 1-based.
    pub fn first_vote_row_index(&self) -> TabulateResult<usize> {
        read_js_index(&self.first_vote_row_index)
    }

    /// The first column holding scores, 1-based.
    pub fn first_vote_column_index(&self) -> TabulateResult<usize> {
        read_js_index(&self.first_vote_column_index)
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub rule: Option<String>,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<JSValue>,
    pub dictator: Option<JSValue>,
    #[serde(rename = "scoreVector")]
    pub score_vector: Option<Vec<f64>>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "inputSource", default)]
    pub input_source: InputSource,
    #[serde(default)]
    pub rules: RulesConfig,
}

pub fn read_config(path: &str) -> TabulateResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> TabulateResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    ensure!(js["results"].is_array(), MissingResultsSnafu { path });
    Ok(js)
}

pub fn read_js_int(x: &Option<JSValue>) -> TabulateResult<Option<u64>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::Number(n)) => n.as_u64().map(Some).context(ParsingJsonNumberSnafu {
            content: n.to_string(),
        }),
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<u64>()
            .ok()
            .map(Some)
            .context(ParsingJsonNumberSnafu { content: s.clone() }),
        Some(v) => ParsingJsonNumberSnafu {
            content: v.to_string(),
        }
        .fail(),
    }
}

// Defaults to 1. Zero is rejected: the indices start at 1 as in spreadsheets.
fn read_js_index(x: &Option<JSValue>) -> TabulateResult<usize> {
    match read_js_int(x)? {
        None => Ok(1),
        Some(0) => whatever!("Row and column indices start at 1, got 0"),
        Some(i) => Ok(i as usize),
    }
}
