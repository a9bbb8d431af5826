use clap::Parser;

/// This program computes the winner of an election with classical social-choice rules.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the election: input source, rule and
    /// tie-break policy. The other flags override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, scvote will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The table of scores: one row per agent, one column per alternative.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx, default from the file extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default plurality) One of dictatorship, scoring, plurality, veto, borda, harmonic, stv, range.
    #[clap(long, value_parser)]
    pub rule: Option<String>,

    /// (default max) One of max, min, random, or the number of the agent that breaks ties.
    #[clap(long, value_parser)]
    pub tie_break: Option<String>,

    /// (number, optional) Seed of the random tie-break, for reproducible results.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (number) The agent whose first choice wins, for the dictatorship rule.
    #[clap(long, value_parser)]
    pub dictator: Option<u32>,

    /// (comma-separated numbers) The points given to each rank, for the scoring rule.
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub score_vector: Option<Vec<f64>>,

    /// (default 1) The first row of the table that contains scores. Rows above it are headers.
    #[clap(long, value_parser)]
    pub first_row: Option<usize>,

    /// (default 1) The first column of the table that contains scores. Columns before it are labels.
    #[clap(long, value_parser)]
    pub first_column: Option<usize>,

    /// (default: first sheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
