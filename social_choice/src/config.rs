// ********* Identifiers ***********

use snafu::Snafu;
use std::fmt::Display;
use std::str::FromStr;

/// An alternative (candidate), named by its 1-indexed column in the input table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct AlternativeId(pub u32);

/// An agent (voter), named by its 1-indexed row in the input table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct AgentId(pub u32);

impl Display for AlternativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AlternativeId {
    fn from(x: u32) -> Self {
        AlternativeId(x)
    }
}

impl From<u32> for AgentId {
    fn from(x: u32) -> Self {
        AgentId(x)
    }
}

// ********* Errors ***********

/// Errors that prevent a rule from producing a winner.
///
/// None of them is transient: the same inputs always produce the same error.
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum VotingErrors {
    #[snafu(display("The election has no agents, no alternatives or no candidate winner"))]
    EmptyElection {},

    #[snafu(display("Agent {agent} is not part of the preference profile"))]
    UnknownAgent { agent: AgentId },

    #[snafu(display(
        "Score vector has {actual} weights but the profile ranks {expected} alternatives"
    ))]
    DimensionMismatch { expected: usize, actual: usize },

    #[snafu(display("Invalid tie-break policy {policy:?}: expected max, min, random or an agent"))]
    InvalidTieBreakPolicy { policy: String },

    #[snafu(display("Agent {agent} ranks none of the tied alternatives {winners:?}"))]
    NoTiebreakMatch {
        agent: AgentId,
        winners: Vec<AlternativeId>,
    },

    #[snafu(display("All the remaining alternatives were eliminated in round {round}"))]
    NoAlternativesRemain { round: u32 },

    #[snafu(display("The ranking of agent {agent} is not a permutation of the alternatives"))]
    InconsistentRanking { agent: AgentId },

    #[snafu(display("Row {row} has {actual} cells, expected {expected}"))]
    RaggedTable {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

// ********* Configuration **********

/// How to pick a single alternative out of a set of tied winners.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum TieBreakMode {
    /// The largest alternative identifier wins.
    #[default]
    Max,
    /// The smallest alternative identifier wins.
    Min,
    /// A uniformly random winner, drawn from the tie breaker's generator.
    Random,
    /// The tied alternative ranked highest by this agent wins.
    Agent(AgentId),
}

impl FromStr for TieBreakMode {
    type Err = VotingErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "max" => Ok(TieBreakMode::Max),
            "min" => Ok(TieBreakMode::Min),
            "random" => Ok(TieBreakMode::Random),
            x => match x.parse::<u32>() {
                Ok(agent) if agent >= 1 => Ok(TieBreakMode::Agent(AgentId(agent))),
                _ => InvalidTieBreakPolicySnafu { policy: x }.fail(),
            },
        }
    }
}

impl Display for TieBreakMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreakMode::Max => write!(f, "max"),
            TieBreakMode::Min => write!(f, "min"),
            TieBreakMode::Random => write!(f, "random"),
            TieBreakMode::Agent(agent) => write!(f, "{}", agent),
        }
    }
}

/// The voting rule to run, with its parameters.
#[derive(PartialEq, Debug, Clone)]
pub enum VotingRule {
    /// The top choice of the given agent wins.
    Dictatorship(AgentId),
    /// Generic positional scoring with one weight per rank.
    Scoring(Vec<f64>),
    Plurality,
    Veto,
    Borda,
    Harmonic,
    /// Single transferable vote with simultaneous elimination of the weakest.
    Stv,
    /// Sum of the raw cell values, bypassing the rankings.
    Range,
}

impl VotingRule {
    pub fn name(&self) -> &'static str {
        match self {
            VotingRule::Dictatorship(_) => "dictatorship",
            VotingRule::Scoring(_) => "scoring",
            VotingRule::Plurality => "plurality",
            VotingRule::Veto => "veto",
            VotingRule::Borda => "borda",
            VotingRule::Harmonic => "harmonic",
            VotingRule::Stv => "stv",
            VotingRule::Range => "range",
        }
    }
}

// ******** Output data structures *********

/// Statistics for one round.
///
/// The positional rules and range voting only have one round. STV has one round
/// per elimination step, followed by the round that elects the winner.
#[derive(PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    pub tally: Vec<(AlternativeId, f64)>,
    pub tally_results_elected: Vec<AlternativeId>,
    pub tally_result_eliminated: Vec<AlternativeId>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct VotingResult {
    pub winner: AlternativeId,
    /// The winner set before tie-breaking. Always contains `winner`.
    pub tied: Vec<AlternativeId>,
    pub round_stats: Vec<RoundStats>,
}
