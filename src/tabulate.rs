use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use social_choice::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tabulate::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TabulateError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Excel file {path} has no such worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell in line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Cell {content:?} in line {lineno} is not a number"))]
    CsvWrongCell { lineno: usize, content: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive integer, got {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("Summary file {path} has no results"))]
    MissingResults { path: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Voting error: {source}"))]
    Voting { source: VotingErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TabulateResult<T> = Result<T, TabulateError>;

fn result_stats_to_json(rs: &VotingResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (alt, score) in round_stat.tally.iter() {
            tally.insert(alt.to_string(), json!(score.to_string()));
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        for alt in round_stat.tally_result_eliminated.iter() {
            tally_results.push(json!({ "eliminated": alt.to_string() }));
        }
        for alt in round_stat.tally_results_elected.iter() {
            tally_results.push(json!({ "elected": alt.to_string() }));
        }

        let js = json!({"round": round_stat.round, "tally": tally, "tallyResults": tally_results});
        l.push(js);
    }
    l
}

fn build_summary_js(config: &OutputConfig, rv: &VotingResult) -> JSValue {
    json!({
        "config": config,
        "winner": rv.winner.to_string(),
        "results": result_stats_to_json(rv) })
}

/// Turns the textual rules into a voting rule and a tie breaker.
pub fn validate_rules(rules: &RulesConfig) -> TabulateResult<(VotingRule, TieBreaker)> {
    let rule = match rules.rule.as_deref().unwrap_or("plurality") {
        "dictatorship" => match read_js_int(&rules.dictator)? {
            Some(agent) if agent >= 1 && agent <= u32::MAX as u64 => {
                VotingRule::Dictatorship(AgentId(agent as u32))
            }
            x => whatever!(
                "The dictatorship rule needs a dictator (an agent number from 1), got {:?}",
                x
            ),
        },
        "scoring" => match &rules.score_vector {
            Some(v) if !v.is_empty() => VotingRule::Scoring(v.clone()),
            _ => whatever!("The scoring rule needs a score vector"),
        },
        "plurality" => VotingRule::Plurality,
        "veto" => VotingRule::Veto,
        "borda" => VotingRule::Borda,
        "harmonic" => VotingRule::Harmonic,
        "stv" => VotingRule::Stv,
        "range" => VotingRule::Range,
        x => whatever!("Unknown voting rule {:?}", x),
    };

    let mode = rules
        .tiebreak_mode
        .as_deref()
        .unwrap_or("max")
        .parse::<TieBreakMode>()
        .context(VotingSnafu {})?;
    let tiebreak = match read_js_int(&rules.random_seed)? {
        Some(seed) => TieBreaker::with_seed(mode, seed),
        None => TieBreaker::new(mode),
    };
    Ok((rule, tiebreak))
}

/// Reads the configuration file, if any. The relative paths it contains are
/// resolved against its directory.
fn load_config(config_path: &Option<String>) -> TabulateResult<ElectionConfig> {
    let config_path = match config_path {
        Some(p) => p,
        None => return Ok(ElectionConfig::default()),
    };
    let mut config = read_config(config_path)?;
    let root_p = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    let resolve = |p: &String| root_p.join(p).display().to_string();
    config.input_source.file_path = config.input_source.file_path.as_ref().map(resolve);
    config.output_settings.output_directory =
        config.output_settings.output_directory.as_ref().map(resolve);
    Ok(config)
}

/// The command line flags take precedence over the configuration file.
fn override_with_args(mut config: ElectionConfig, args: &Args) -> ElectionConfig {
    let source = &mut config.input_source;
    if let Some(x) = &args.input {
        source.file_path = Some(x.clone());
    }
    if let Some(x) = &args.input_type {
        source.provider = Some(x.clone());
    }
    if let Some(x) = &args.excel_worksheet_name {
        source.excel_worksheet_name = Some(x.clone());
    }
    if let Some(x) = args.first_row {
        source.first_vote_row_index = Some(json!(x));
    }
    if let Some(x) = args.first_column {
        source.first_vote_column_index = Some(json!(x));
    }

    let rules = &mut config.rules;
    if let Some(x) = &args.rule {
        rules.rule = Some(x.clone());
    }
    if let Some(x) = &args.tie_break {
        rules.tiebreak_mode = Some(x.clone());
    }
    if let Some(x) = args.seed {
        rules.random_seed = Some(json!(x));
    }
    if let Some(x) = args.dictator {
        rules.dictator = Some(json!(x));
    }
    if let Some(x) = &args.score_vector {
        rules.score_vector = Some(x.clone());
    }
    config
}

fn read_table(source: &InputSource) -> TabulateResult<Grid> {
    let path = match &source.file_path {
        Some(p) => p.clone(),
        None => whatever!("No input file: pass --input or set inputSource.filePath"),
    };
    let provider = match &source.provider {
        Some(p) => p.clone(),
        None => Path::new(&path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_lowercase(),
    };
    let first_row = source.first_vote_row_index()?;
    let first_col = source.first_vote_column_index()?;
    info!("Attempting to read {} file {:?}", provider, path);
    match provider.as_str() {
        "csv" => io_csv::read_csv_file(&path, first_row, first_col),
        "xlsx" | "excel" => io_excel::read_excel_file(
            &path,
            source.excel_worksheet_name.as_deref(),
            first_row,
            first_col,
        ),
        x => whatever!("Unknown input type {:?}: expected csv or xlsx", x),
    }
}

/// Runs the election described by the configuration. Returns the result and its
/// JSON summary.
pub fn tabulate(config: &ElectionConfig) -> TabulateResult<(VotingResult, JSValue)> {
    let (rule, mut tiebreak) = validate_rules(&config.rules)?;
    let table = read_table(&config.input_source)?;
    let result = run_voting_stats(&rule, &table, &mut tiebreak).context(VotingSnafu {})?;
    debug!("tabulate: result: {:?}", result);

    let contest = match (
        &config.output_settings.contest_name,
        &config.input_source.file_path,
    ) {
        (Some(name), _) => name.clone(),
        (None, Some(p)) => io_common::simplify_file_name(p),
        (None, None) => "election".to_string(),
    };
    let output_config = OutputConfig {
        contest,
        rule: rule.name().to_string(),
        tiebreak_mode: tiebreak.mode().to_string(),
    };
    let summary = build_summary_js(&output_config, &result);
    Ok((result, summary))
}

fn output_path(args: &Args, config: &ElectionConfig, summary: &JSValue) -> Option<String> {
    if args.out.is_some() {
        return args.out.clone();
    }
    let dir = config.output_settings.output_directory.as_ref()?;
    let contest = summary["config"]["contest"].as_str().unwrap_or("election");
    let p: PathBuf = [dir.clone(), format!("{}_summary.json", contest)]
        .iter()
        .collect();
    Some(p.display().to_string())
}

fn write_summary(out: &str, pretty_js_stats: &str) -> TabulateResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js_stats);
        return Ok(());
    }
    if let Some(parent) = Path::new(out).parent() {
        fs::create_dir_all(parent).context(WritingOutputSnafu { path: out })?;
    }
    info!("Writing summary to {:?}", out);
    fs::write(out, pretty_js_stats).context(WritingOutputSnafu { path: out })
}

fn check_reference(summary_path: &str, pretty_js_stats: &str) -> TabulateResult<()> {
    let summary_ref = read_summary(summary_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn run_election(args: &Args) -> TabulateResult<()> {
    let config = override_with_args(load_config(&args.config)?, args);
    info!("config: {:?}", config);

    let (result, summary) = tabulate(&config)?;
    println!("winner: {}", result.winner);

    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    if let Some(out) = output_path(args, &config, &summary) {
        write_summary(&out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        check_reference(summary_p, &pretty_js_stats)?;
    }
    Ok(())
}
