//! Single transferable vote, single winner.
//!
//! Every round, the first choices of the agents are counted and all the alternatives
//! with the lowest count are eliminated together. The ballots then move on to their
//! next surviving choice. The last alternative standing wins.

use crate::builder::Profile;
use crate::config::*;
use crate::tally::Tally;
use crate::tiebreak::TieBreaker;

use log::{debug, info};
use snafu::prelude::*;
use std::collections::BTreeSet;

/// One elimination round.
#[derive(PartialEq, Debug, Clone)]
pub struct StvRound {
    pub round: u32,
    /// First-choice counts of the alternatives alive at the start of the round.
    pub tally: Tally,
    pub eliminated: Vec<AlternativeId>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct StvOutcome {
    pub rounds: Vec<StvRound>,
    /// The alternatives left after the last round: exactly one, unless the profile
    /// ranks no alternative at all.
    pub survivors: Vec<AlternativeId>,
}

/// Runs the elimination rounds, stripping the eliminated alternatives from the
/// rankings of `profile`.
pub fn stv_rounds(profile: &mut Profile) -> Result<StvOutcome, VotingErrors> {
    let reference = profile.reference_ranking().context(EmptyElectionSnafu {})?;
    let mut live: BTreeSet<AlternativeId> = reference.iter().cloned().collect();
    let mut rounds: Vec<StvRound> = Vec::new();

    while live.len() > 1 {
        let round = rounds.len() as u32 + 1;
        let mut tally = Tally::zeroed(live.iter().cloned());
        for (_, ranking) in profile.rankings() {
            match ranking.first() {
                Some(first) if live.contains(first) => tally.add(*first, 1.0),
                _ => {}
            }
        }
        debug!("stv_rounds: round {} tally: {:?}", round, tally);

        let eliminated: BTreeSet<AlternativeId> = tally.losers().into_iter().collect();
        ensure!(
            eliminated.len() < live.len(),
            NoAlternativesRemainSnafu { round }
        );
        info!("stv_rounds: round {} eliminated {:?}", round, eliminated);

        profile.remove_alternatives(&eliminated);
        live.retain(|alt| !eliminated.contains(alt));
        rounds.push(StvRound {
            round,
            tally,
            eliminated: eliminated.into_iter().collect(),
        });
    }

    Ok(StvOutcome {
        rounds,
        survivors: live.into_iter().collect(),
    })
}

/// Single transferable vote.
///
/// The profile is consumed: its rankings are cut down as the alternatives get
/// eliminated. Clone it beforehand to keep the original ballots.
pub fn stv(mut profile: Profile, tiebreak: &mut TieBreaker) -> Result<AlternativeId, VotingErrors> {
    let outcome = stv_rounds(&mut profile)?;
    let winner = tiebreak.resolve(&profile, &outcome.survivors)?;
    info!(
        "stv: winner {} after {} rounds",
        winner,
        outcome.rounds.len()
    );
    Ok(winner)
}
