//! Positional scoring rules: every rank of a ballot is worth a fixed number of points.
//!
//! Each rule comes in two flavours: a `*_tally` function that computes the scores, and
//! a function that also resolves the winner.

use crate::builder::Profile;
use crate::config::*;
use crate::tally::Tally;
use crate::tiebreak::TieBreaker;

use log::{debug, info};
use snafu::prelude::*;

/// Scores with an arbitrary weight per rank: `score_vector[i]` points go to the
/// alternative ranked at position `i` (0-indexed) by each agent.
///
/// The vector must have one weight per alternative.
pub fn scoring_tally(profile: &Profile, score_vector: &[f64]) -> Result<Tally, VotingErrors> {
    let reference = profile.reference_ranking().context(EmptyElectionSnafu {})?;
    let m = reference.len();
    ensure!(
        score_vector.len() == m,
        DimensionMismatchSnafu {
            expected: m,
            actual: score_vector.len(),
        }
    );
    let mut tally = Tally::zeroed((1..=m as u32).map(AlternativeId));
    for (_, ranking) in profile.rankings() {
        for (alt, weight) in ranking.iter().zip(score_vector.iter()) {
            tally.add(*alt, *weight);
        }
    }
    debug!("scoring_tally: {:?}", tally);
    Ok(tally)
}

pub fn scoring_rule(
    profile: &Profile,
    score_vector: &[f64],
    tiebreak: &mut TieBreaker,
) -> Result<AlternativeId, VotingErrors> {
    let tally = scoring_tally(profile, score_vector)?;
    pick_winner("scoring_rule", profile, &tally, tiebreak)
}

/// Counts the first choices only.
///
/// Unlike the other positional rules, an alternative that nobody ranks first does not
/// appear in the tally at all.
pub fn plurality_tally(profile: &Profile) -> Tally {
    let mut tally = Tally::default();
    for (_, ranking) in profile.rankings() {
        if let Some(first) = ranking.first() {
            tally.add(*first, 1.0);
        }
    }
    debug!("plurality_tally: {:?}", tally);
    tally
}

pub fn plurality(
    profile: &Profile,
    tiebreak: &mut TieBreaker,
) -> Result<AlternativeId, VotingErrors> {
    let tally = plurality_tally(profile);
    pick_winner("plurality", profile, &tally, tiebreak)
}

/// One point for every alternative except the last one of each ballot.
pub fn veto_tally(profile: &Profile) -> Result<Tally, VotingErrors> {
    let reference = profile.reference_ranking().context(EmptyElectionSnafu {})?;
    let mut tally = Tally::zeroed(reference.iter().cloned());
    for (_, ranking) in profile.rankings() {
        if let Some((_, kept)) = ranking.split_last() {
            for alt in kept {
                tally.add(*alt, 1.0);
            }
        }
    }
    debug!("veto_tally: {:?}", tally);
    Ok(tally)
}

pub fn veto(profile: &Profile, tiebreak: &mut TieBreaker) -> Result<AlternativeId, VotingErrors> {
    let tally = veto_tally(profile)?;
    pick_winner("veto", profile, &tally, tiebreak)
}

/// `m - i` points for the alternative at rank `i`, with `m` alternatives.
pub fn borda_tally(profile: &Profile) -> Result<Tally, VotingErrors> {
    let reference = profile.reference_ranking().context(EmptyElectionSnafu {})?;
    let m = reference.len();
    let mut tally = Tally::zeroed(reference.iter().cloned());
    for (_, ranking) in profile.rankings() {
        for (i, alt) in ranking.iter().enumerate() {
            tally.add(*alt, (m - i) as f64);
        }
    }
    debug!("borda_tally: {:?}", tally);
    Ok(tally)
}

pub fn borda(profile: &Profile, tiebreak: &mut TieBreaker) -> Result<AlternativeId, VotingErrors> {
    let tally = borda_tally(profile)?;
    pick_winner("borda", profile, &tally, tiebreak)
}

/// `1 / (i + 1)` points for the alternative at rank `i`.
///
/// The sums are floating point numbers and are compared exactly when looking for the
/// best score.
pub fn harmonic_tally(profile: &Profile) -> Tally {
    let mut tally = Tally::default();
    for (_, ranking) in profile.rankings() {
        for (i, alt) in ranking.iter().enumerate() {
            tally.add(*alt, 1.0 / (i + 1) as f64);
        }
    }
    debug!("harmonic_tally: {:?}", tally);
    tally
}

pub fn harmonic(
    profile: &Profile,
    tiebreak: &mut TieBreaker,
) -> Result<AlternativeId, VotingErrors> {
    let tally = harmonic_tally(profile);
    pick_winner("harmonic", profile, &tally, tiebreak)
}

pub(crate) fn pick_winner(
    rule: &str,
    profile: &Profile,
    tally: &Tally,
    tiebreak: &mut TieBreaker,
) -> Result<AlternativeId, VotingErrors> {
    let winners = tally.winners();
    debug!("{}: winners before tiebreak: {:?}", rule, winners);
    let winner = tiebreak.resolve(profile, &winners)?;
    info!("{}: winner {}", rule, winner);
    Ok(winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(rows: &[&[u32]]) -> Profile {
        Profile::from_rankings(rows.iter().enumerate().map(|(idx, r)| {
            (
                AgentId(idx as u32 + 1),
                r.iter().map(|x| AlternativeId(*x)).collect(),
            )
        }))
        .unwrap()
    }

    fn scores(t: &Tally) -> Vec<(u32, f64)> {
        t.iter().map(|(alt, s)| (alt.0, s)).collect()
    }

    fn example() -> Profile {
        profile(&[&[2, 1, 3], &[1, 2, 3], &[1, 3, 2]])
    }

    fn max() -> TieBreaker {
        TieBreaker::with_seed(TieBreakMode::Max, 0)
    }

    #[test]
    fn plurality_example() {
        let _ = env_logger::try_init();
        let p = example();
        assert_eq!(scores(&plurality_tally(&p)), vec![(1, 2.0), (2, 1.0)]);
        assert_eq!(plurality(&p, &mut max()), Ok(AlternativeId(1)));
    }

    #[test]
    fn borda_example() {
        let p = example();
        assert_eq!(
            scores(&borda_tally(&p).unwrap()),
            vec![(1, 8.0), (2, 6.0), (3, 4.0)]
        );
        assert_eq!(borda(&p, &mut max()), Ok(AlternativeId(1)));
    }

    #[test]
    fn veto_example() {
        let p = example();
        assert_eq!(
            scores(&veto_tally(&p).unwrap()),
            vec![(1, 3.0), (2, 2.0), (3, 1.0)]
        );
        assert_eq!(veto(&p, &mut max()), Ok(AlternativeId(1)));
    }

    #[test]
    fn harmonic_tie_goes_to_the_tiebreaker() {
        let p = profile(&[&[1, 2], &[2, 1]]);
        assert_eq!(scores(&harmonic_tally(&p)), vec![(1, 1.5), (2, 1.5)]);
        assert_eq!(harmonic(&p, &mut max()), Ok(AlternativeId(2)));
        let mut min = TieBreaker::with_seed(TieBreakMode::Min, 0);
        assert_eq!(harmonic(&p, &mut min), Ok(AlternativeId(1)));
    }

    #[test]
    fn harmonic_scores() {
        let p = profile(&[&[3, 1, 2], &[3, 2, 1]]);
        let t = harmonic_tally(&p);
        assert_eq!(t.score(AlternativeId(3)), Some(2.0));
        assert_eq!(harmonic(&p, &mut max()), Ok(AlternativeId(3)));
    }

    #[test]
    fn scoring_rule_matches_borda_and_veto() {
        let profiles = vec![
            example(),
            profile(&[&[1, 2, 3, 4], &[4, 3, 2, 1], &[2, 4, 1, 3]]),
            profile(&[&[3, 1, 2], &[3, 2, 1], &[1, 2, 3], &[2, 1, 3]]),
        ];
        for p in profiles.iter() {
            let m = p.num_alternatives();
            let borda_vec: Vec<f64> = (0..m).map(|i| (m - i) as f64).collect();
            let mut veto_vec: Vec<f64> = vec![1.0; m];
            veto_vec[m - 1] = 0.0;

            assert_eq!(scoring_tally(p, &borda_vec), borda_tally(p));
            assert_eq!(scoring_tally(p, &veto_vec), veto_tally(p));
            assert_eq!(
                scoring_rule(p, &borda_vec, &mut max()),
                borda(p, &mut max())
            );
            assert_eq!(scoring_rule(p, &veto_vec, &mut max()), veto(p, &mut max()));
        }
    }

    #[test]
    fn scoring_rule_matches_plurality_when_everybody_is_first_somewhere() {
        let p = profile(&[&[1, 2, 3], &[2, 3, 1], &[3, 1, 2], &[1, 3, 2]]);
        let t = scoring_tally(&p, &[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(t.winners(), plurality_tally(&p).winners());
    }

    #[test]
    fn plurality_ignores_alternatives_never_ranked_first() {
        // Alternative 3 is never first: it is absent from the plurality tally but scored
        // 0 by the generic rule.
        let p = profile(&[&[1, 2, 3], &[2, 1, 3]]);
        let pt = plurality_tally(&p);
        assert_eq!(pt.score(AlternativeId(3)), None);
        let st = scoring_tally(&p, &[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(st.score(AlternativeId(3)), Some(0.0));
        assert_eq!(pt.winners(), vec![AlternativeId(1), AlternativeId(2)]);
        assert_eq!(plurality(&p, &mut max()), Ok(AlternativeId(2)));
    }

    #[test]
    fn score_vector_must_match_the_alternatives() {
        let p = example();
        assert_eq!(
            scoring_rule(&p, &[1.0, 0.0], &mut max()),
            Err(VotingErrors::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn weighted_scoring_rule() {
        // 1 gets 5 + 0 + 0, 2 gets 0 + 5 + 2, 3 gets 2 + 2 + 5
        let p = profile(&[&[1, 3, 2], &[2, 3, 1], &[3, 2, 1]]);
        let t = scoring_tally(&p, &[5.0, 2.0, 0.0]).unwrap();
        assert_eq!(scores(&t), vec![(1, 5.0), (2, 7.0), (3, 9.0)]);
        assert_eq!(
            scoring_rule(&p, &[5.0, 2.0, 0.0], &mut max()),
            Ok(AlternativeId(3))
        );
    }

    #[test]
    fn ties_can_be_broken_by_an_agent() {
        let p = profile(&[&[1, 2, 3], &[2, 1, 3]]);
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(2)), 0);
        assert_eq!(borda(&p, &mut tb), Ok(AlternativeId(2)));
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(1)), 0);
        assert_eq!(borda(&p, &mut tb), Ok(AlternativeId(1)));
    }

    #[test]
    fn random_tiebreak_returns_a_tied_alternative() {
        let p = profile(&[&[1, 2, 3], &[2, 1, 3]]);
        let mut tb = TieBreaker::with_seed(TieBreakMode::Random, 3);
        for _ in 0..10 {
            let w = veto(&p, &mut tb).unwrap();
            assert!(w == AlternativeId(1) || w == AlternativeId(2));
        }
    }

    #[test]
    fn empty_profile_has_no_winner() {
        let p = Profile::default();
        assert_eq!(
            borda(&p, &mut max()),
            Err(VotingErrors::EmptyElection {})
        );
        assert_eq!(
            plurality(&p, &mut max()),
            Err(VotingErrors::EmptyElection {})
        );
        assert_eq!(
            harmonic(&p, &mut max()),
            Err(VotingErrors::EmptyElection {})
        );
        assert_eq!(
            scoring_rule(&p, &[], &mut max()),
            Err(VotingErrors::EmptyElection {})
        );
    }
}
