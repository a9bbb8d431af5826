use crate::builder::Profile;
use crate::config::*;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snafu::prelude::*;

/// Resolves ties between winning alternatives, following a [TieBreakMode].
///
/// The tie breaker owns the random generator used by [TieBreakMode::Random]. It is the
/// only source of randomness of the crate: build it with [TieBreaker::with_seed] to get
/// reproducible results.
///
/// ```
/// use social_choice::tiebreak::TieBreaker;
/// use social_choice::builder::Profile;
/// use social_choice::{AlternativeId, TieBreakMode};
/// # use social_choice::VotingErrors;
///
/// let mut tb = TieBreaker::with_seed(TieBreakMode::Min, 42);
/// let winner = tb.resolve(&Profile::default(), &[AlternativeId(3), AlternativeId(1)])?;
/// assert_eq!(winner, AlternativeId(1));
///
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct TieBreaker {
    mode: TieBreakMode,
    rng: StdRng,
}

impl TieBreaker {
    /// A tie breaker whose random generator is seeded by the operating system.
    pub fn new(mode: TieBreakMode) -> TieBreaker {
        TieBreaker {
            mode,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(mode: TieBreakMode, seed: u64) -> TieBreaker {
        TieBreaker {
            mode,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> TieBreakMode {
        self.mode
    }

    /// Picks one alternative out of `winners`.
    ///
    /// A single winner is returned as is, without looking at the mode. The agent of
    /// [TieBreakMode::Agent] is only checked against the profile when a real tie
    /// happens.
    pub fn resolve(
        &mut self,
        profile: &Profile,
        winners: &[AlternativeId],
    ) -> Result<AlternativeId, VotingErrors> {
        match winners {
            [] => EmptyElectionSnafu {}.fail(),
            [single] => Ok(*single),
            _ => {
                let res = self.resolve_tie(profile, winners)?;
                debug!(
                    "resolve: tie between {:?} resolved with mode {}: {}",
                    winners, self.mode, res
                );
                Ok(res)
            }
        }
    }

    fn resolve_tie(
        &mut self,
        profile: &Profile,
        winners: &[AlternativeId],
    ) -> Result<AlternativeId, VotingErrors> {
        match self.mode {
            TieBreakMode::Max => winners.iter().max().cloned().context(EmptyElectionSnafu {}),
            TieBreakMode::Min => winners.iter().min().cloned().context(EmptyElectionSnafu {}),
            TieBreakMode::Random => {
                let idx = self.rng.random_range(0..winners.len());
                Ok(winners[idx])
            }
            TieBreakMode::Agent(agent) => {
                let ranking = profile.ranking(agent).context(InvalidTieBreakPolicySnafu {
                    policy: agent.to_string(),
                })?;
                ranking
                    .iter()
                    .find(|alt| winners.contains(*alt))
                    .cloned()
                    .context(NoTiebreakMatchSnafu {
                        agent,
                        winners: winners.to_vec(),
                    })
            }
        }
    }
}

impl Default for TieBreaker {
    fn default() -> Self {
        TieBreaker::new(TieBreakMode::Max)
    }
}

impl std::fmt::Debug for TieBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieBreaker")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alts(xs: &[u32]) -> Vec<AlternativeId> {
        xs.iter().map(|x| AlternativeId(*x)).collect()
    }

    fn profile() -> Profile {
        Profile::from_rankings(vec![
            (AgentId(1), alts(&[2, 1, 3])),
            (AgentId(2), alts(&[3, 1, 2])),
        ])
        .unwrap()
    }

    #[test]
    fn single_winner_skips_the_policy() {
        // Agent 9 does not exist, but there is nothing to break.
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(9)), 0);
        assert_eq!(tb.resolve(&profile(), &alts(&[3])), Ok(AlternativeId(3)));
    }

    #[test]
    fn max_and_min_are_extremes() {
        let winners = alts(&[2, 5, 1, 4]);
        let mut tb = TieBreaker::with_seed(TieBreakMode::Max, 0);
        let first = tb.resolve(&profile(), &winners).unwrap();
        assert_eq!(first, AlternativeId(5));
        assert_eq!(tb.resolve(&profile(), &winners), Ok(first));
        assert!(winners.iter().all(|w| *w <= first));

        let mut tb = TieBreaker::with_seed(TieBreakMode::Min, 0);
        let first = tb.resolve(&profile(), &winners).unwrap();
        assert_eq!(first, AlternativeId(1));
        assert!(winners.iter().all(|w| *w >= first));
    }

    #[test]
    fn random_picks_a_winner_and_is_seedable() {
        let winners = alts(&[1, 2, 3, 4, 5, 6]);
        let mut tb1 = TieBreaker::with_seed(TieBreakMode::Random, 7);
        let mut tb2 = TieBreaker::with_seed(TieBreakMode::Random, 7);
        let draws1: Vec<AlternativeId> = (0..20)
            .map(|_| tb1.resolve(&profile(), &winners).unwrap())
            .collect();
        let draws2: Vec<AlternativeId> = (0..20)
            .map(|_| tb2.resolve(&profile(), &winners).unwrap())
            .collect();
        assert_eq!(draws1, draws2);
        assert!(draws1.iter().all(|w| winners.contains(w)));
    }

    #[test]
    fn agent_is_the_tiebreaking_dictator() {
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(2)), 0);
        assert_eq!(
            tb.resolve(&profile(), &alts(&[1, 2])),
            Ok(AlternativeId(1))
        );
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(1)), 0);
        assert_eq!(
            tb.resolve(&profile(), &alts(&[1, 3])),
            Ok(AlternativeId(1))
        );
    }

    #[test]
    fn unknown_agent_is_an_invalid_policy() {
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(9)), 0);
        assert_eq!(
            tb.resolve(&profile(), &alts(&[1, 2])),
            Err(VotingErrors::InvalidTieBreakPolicy {
                policy: "9".to_string()
            })
        );
    }

    #[test]
    fn agent_without_any_tied_alternative() {
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(1)), 0);
        assert_eq!(
            tb.resolve(&profile(), &alts(&[7, 8])),
            Err(VotingErrors::NoTiebreakMatch {
                agent: AgentId(1),
                winners: alts(&[7, 8])
            })
        );
    }

    #[test]
    fn no_winner_at_all() {
        let mut tb = TieBreaker::default();
        assert_eq!(
            tb.resolve(&profile(), &[]),
            Err(VotingErrors::EmptyElection {})
        );
    }
}
