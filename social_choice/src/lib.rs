/*!
Classical social-choice rules over ranked or scored ballots.

The input is a table of numbers: one row per agent, one column per alternative.
Each row is turned into a ranking (largest value first) and the rules work either on
these rankings (dictatorship, plurality, veto, Borda, harmonic, generic scoring, STV)
or directly on the values (range voting). Ties between winners are resolved by a
[tiebreak::TieBreaker].

```
use social_choice::*;
# use social_choice::VotingErrors;

let table = Grid::new(vec![
    vec![2.0, 3.0, 1.0],
    vec![3.0, 2.0, 1.0],
    vec![3.0, 1.0, 2.0],
])?;
let profile = build_profile(&table);

let mut tb = TieBreaker::with_seed(TieBreakMode::Max, 0);
assert_eq!(borda(&profile, &mut tb)?, AlternativeId(1));
assert_eq!(dictatorship(&profile, AgentId(1))?, AlternativeId(2));

let result = run_voting_stats(&VotingRule::Stv, &table, &mut tb)?;
assert_eq!(result.winner, AlternativeId(1));

# Ok::<(), VotingErrors>(())
```
*/
pub mod builder;
mod config;
pub mod manual;
pub mod positional;
pub mod range;
pub mod stv;
pub mod tally;
pub mod tiebreak;

use log::{debug, info};
use snafu::prelude::*;

pub use crate::builder::{build_profile, Grid, Profile, Table};
pub use crate::config::*;
pub use crate::positional::{
    borda, borda_tally, harmonic, harmonic_tally, plurality, plurality_tally, scoring_rule,
    scoring_tally, veto, veto_tally,
};
pub use crate::range::{range_tally, range_voting};
pub use crate::stv::{stv, stv_rounds, StvOutcome, StvRound};
pub use crate::tally::Tally;
pub use crate::tiebreak::TieBreaker;

/// The top choice of `agent` wins, whatever the other agents think.
pub fn dictatorship(profile: &Profile, agent: AgentId) -> Result<AlternativeId, VotingErrors> {
    let ranking = profile
        .ranking(agent)
        .context(UnknownAgentSnafu { agent })?;
    let winner = ranking.first().cloned().context(EmptyElectionSnafu {})?;
    info!("dictatorship: agent {} picks {}", agent, winner);
    Ok(winner)
}

/// Runs the given rule on a table and reports the winner with the statistics of
/// every round.
///
/// Arguments:
/// * `rule` the voting rule and its parameters
/// * `table` the scores given by each agent (rows) to each alternative (columns)
/// * `tiebreak` resolves the ties between the best alternatives
pub fn run_voting_stats(
    rule: &VotingRule,
    table: &dyn Table,
    tiebreak: &mut TieBreaker,
) -> Result<VotingResult, VotingErrors> {
    info!(
        "Processing {:?} agents, {:?} alternatives, rule: {:?}, tiebreak: {}",
        table.row_count(),
        table.column_count(),
        rule,
        tiebreak.mode()
    );
    let profile = build_profile(table);

    let res = match rule {
        VotingRule::Dictatorship(agent) => {
            let winner = dictatorship(&profile, *agent)?;
            VotingResult {
                winner,
                tied: vec![winner],
                round_stats: vec![RoundStats {
                    round: 1,
                    tally: Vec::new(),
                    tally_results_elected: vec![winner],
                    tally_result_eliminated: Vec::new(),
                }],
            }
        }
        VotingRule::Scoring(score_vector) => {
            let tally = scoring_tally(&profile, score_vector)?;
            run_single_round(&profile, &tally, tiebreak)?
        }
        VotingRule::Plurality => run_single_round(&profile, &plurality_tally(&profile), tiebreak)?,
        VotingRule::Veto => run_single_round(&profile, &veto_tally(&profile)?, tiebreak)?,
        VotingRule::Borda => run_single_round(&profile, &borda_tally(&profile)?, tiebreak)?,
        VotingRule::Harmonic => run_single_round(&profile, &harmonic_tally(&profile), tiebreak)?,
        VotingRule::Range => run_single_round(&profile, &range_tally(table), tiebreak)?,
        VotingRule::Stv => run_stv(profile, tiebreak)?,
    };

    info!(
        "{}: winner {} (tied: {:?})",
        rule.name(),
        res.winner,
        res.tied
    );
    Ok(res)
}

fn run_single_round(
    profile: &Profile,
    tally: &Tally,
    tiebreak: &mut TieBreaker,
) -> Result<VotingResult, VotingErrors> {
    let tied = tally.winners();
    let winner = tiebreak.resolve(profile, &tied)?;
    Ok(VotingResult {
        winner,
        tied,
        round_stats: vec![RoundStats {
            round: 1,
            tally: tally.into(),
            tally_results_elected: vec![winner],
            tally_result_eliminated: Vec::new(),
        }],
    })
}

fn run_stv(mut profile: Profile, tiebreak: &mut TieBreaker) -> Result<VotingResult, VotingErrors> {
    let outcome = stv_rounds(&mut profile)?;
    let winner = tiebreak.resolve(&profile, &outcome.survivors)?;

    let mut round_stats: Vec<RoundStats> = outcome
        .rounds
        .iter()
        .map(|r| RoundStats {
            round: r.round,
            tally: (&r.tally).into(),
            tally_results_elected: Vec::new(),
            tally_result_eliminated: r.eliminated.clone(),
        })
        .collect();

    // The last round only counts the ballots going to the winner.
    let mut final_tally = Tally::zeroed(outcome.survivors.iter().cloned());
    for (_, ranking) in profile.rankings() {
        if let Some(first) = ranking.first() {
            final_tally.add(*first, 1.0);
        }
    }
    debug!("run_stv: final tally: {:?}", final_tally);
    round_stats.push(RoundStats {
        round: round_stats.len() as u32 + 1,
        tally: (&final_tally).into(),
        tally_results_elected: vec![winner],
        tally_result_eliminated: Vec::new(),
    });

    Ok(VotingResult {
        winner,
        tied: outcome.survivors,
        round_stats,
    })
}
