pub use crate::config::*;

use log::debug;
use snafu::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// A rectangular grid of numeric cells: one row per agent, one column per alternative.
///
/// Indices are 1-based, following the conventions of the spreadsheet world.
pub trait Table {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    /// The value at (`row`, `col`), with `1 <= row <= row_count()` and
    /// `1 <= col <= column_count()`.
    fn cell(&self, row: usize, col: usize) -> f64;
}

/// An in-memory table.
///
/// ```
/// use social_choice::builder::{Grid, Table};
/// # use social_choice::VotingErrors;
///
/// let grid = Grid::new(vec![vec![0.5, 2.0], vec![1.0, 1.0]])?;
/// assert_eq!(grid.row_count(), 2);
/// assert_eq!(grid.cell(1, 2), 2.0);
///
/// # Ok::<(), VotingErrors>(())
/// ```
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl Grid {
    /// Builds a grid out of rows that must all have the same width.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Grid, VotingErrors> {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        for (idx, r) in rows.iter().enumerate() {
            ensure!(
                r.len() == columns,
                RaggedTableSnafu {
                    row: idx + 1,
                    expected: columns,
                    actual: r.len(),
                }
            );
        }
        Ok(Grid { rows, columns })
    }
}

impl Table for Grid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell(&self, row: usize, col: usize) -> f64 {
        self.rows[row - 1][col - 1]
    }
}

/// The ranked ballots of all the agents, most preferred alternative first.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Profile {
    rankings: BTreeMap<AgentId, Vec<AlternativeId>>,
}

impl Profile {
    /// Builds a profile out of explicit rankings.
    ///
    /// Every ranking must be a permutation of the alternatives `1..=m`, with the same
    /// `m` for all the agents.
    ///
    /// ```
    /// use social_choice::builder::Profile;
    /// use social_choice::{AgentId, AlternativeId};
    /// # use social_choice::VotingErrors;
    ///
    /// let profile = Profile::from_rankings(vec![
    ///     (AgentId(1), vec![AlternativeId(2), AlternativeId(1)]),
    ///     (AgentId(2), vec![AlternativeId(1), AlternativeId(2)]),
    /// ])?;
    /// assert_eq!(profile.num_alternatives(), 2);
    ///
    /// # Ok::<(), VotingErrors>(())
    /// ```
    pub fn from_rankings<I>(rankings: I) -> Result<Profile, VotingErrors>
    where
        I: IntoIterator<Item = (AgentId, Vec<AlternativeId>)>,
    {
        let rankings: BTreeMap<AgentId, Vec<AlternativeId>> = rankings.into_iter().collect();
        let expected: Option<BTreeSet<AlternativeId>> = rankings
            .values()
            .next()
            .map(|r| (1..=r.len() as u32).map(AlternativeId).collect());
        if let Some(expected) = expected {
            for (agent, ranking) in rankings.iter() {
                let seen: BTreeSet<AlternativeId> = ranking.iter().cloned().collect();
                ensure!(
                    agent.0 >= 1 && ranking.len() == seen.len() && seen == expected,
                    InconsistentRankingSnafu { agent: *agent }
                );
            }
        }
        Ok(Profile { rankings })
    }

    /// The ranking of one agent, if this agent is part of the profile.
    pub fn ranking(&self, agent: AgentId) -> Option<&[AlternativeId]> {
        self.rankings.get(&agent).map(|r| r.as_slice())
    }

    pub fn contains_agent(&self, agent: AgentId) -> bool {
        self.rankings.contains_key(&agent)
    }

    /// All the rankings, by increasing agent id.
    pub fn rankings(&self) -> impl Iterator<Item = (AgentId, &[AlternativeId])> + '_ {
        self.rankings.iter().map(|(a, r)| (*a, r.as_slice()))
    }

    pub fn num_agents(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// The ranking of the first agent. All the agents rank the same alternatives,
    /// so this one stands for everybody when the alternative set is needed.
    pub fn reference_ranking(&self) -> Option<&[AlternativeId]> {
        self.rankings.values().next().map(|r| r.as_slice())
    }

    /// The number of alternatives ranked by the reference agent (0 if empty).
    pub fn num_alternatives(&self) -> usize {
        self.reference_ranking().map(|r| r.len()).unwrap_or(0)
    }

    /// Strips the given alternatives out of every ranking.
    pub(crate) fn remove_alternatives(&mut self, eliminated: &BTreeSet<AlternativeId>) {
        for ranking in self.rankings.values_mut() {
            ranking.retain(|alt| !eliminated.contains(alt));
        }
    }
}

/// Converts a table of scores into a preference profile.
///
/// Each row becomes the ranking of one agent, ordering the columns by decreasing value.
/// The sort is stable: columns with equal values keep their left-to-right order, so a
/// row `[1, 3, 3]` ranks alternative 2 above alternative 3.
///
/// The comparison is `f64::total_cmp`, which treats `-0.0` as smaller than `0.0`.
pub fn build_profile(table: &dyn Table) -> Profile {
    let mut rankings: BTreeMap<AgentId, Vec<AlternativeId>> = BTreeMap::new();
    for row in 1..=table.row_count() {
        let mut pairs: Vec<(AlternativeId, f64)> = (1..=table.column_count())
            .map(|col| (AlternativeId(col as u32), table.cell(row, col)))
            .collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        let ranking: Vec<AlternativeId> = pairs.into_iter().map(|(alt, _)| alt).collect();
        debug!("build_profile: agent {} ranking {:?}", row, ranking);
        rankings.insert(AgentId(row as u32), ranking);
    }
    Profile { rankings }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alts(xs: &[u32]) -> Vec<AlternativeId> {
        xs.iter().map(|x| AlternativeId(*x)).collect()
    }

    #[test]
    fn rows_become_descending_rankings() {
        let grid = Grid::new(vec![vec![0.1, 0.9, 0.5], vec![3.0, 1.0, 2.0]]).unwrap();
        let profile = build_profile(&grid);
        assert_eq!(profile.num_agents(), 2);
        assert_eq!(profile.ranking(AgentId(1)), Some(alts(&[2, 3, 1]).as_slice()));
        assert_eq!(profile.ranking(AgentId(2)), Some(alts(&[1, 3, 2]).as_slice()));
    }

    #[test]
    fn equal_values_keep_column_order() {
        let grid = Grid::new(vec![vec![1.0, 3.0, 3.0, 1.0]]).unwrap();
        let profile = build_profile(&grid);
        assert_eq!(
            profile.ranking(AgentId(1)),
            Some(alts(&[2, 3, 1, 4]).as_slice())
        );
    }

    #[test]
    fn built_rankings_are_permutations() {
        let grid = Grid::new(vec![
            vec![5.0, -1.0, 2.5, 2.5, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0],
            vec![-3.0, 8.0, 1.0, 7.0, 4.0],
        ])
        .unwrap();
        let profile = build_profile(&grid);
        for (_, ranking) in profile.rankings() {
            let mut sorted = ranking.to_vec();
            sorted.sort();
            assert_eq!(sorted, alts(&[1, 2, 3, 4, 5]));
        }
        // Rebuilding through the validating constructor keeps the same profile.
        let rebuilt =
            Profile::from_rankings(profile.rankings().map(|(a, r)| (a, r.to_vec()))).unwrap();
        assert_eq!(rebuilt, profile);
    }

    #[test]
    fn empty_table_gives_empty_profile() {
        let grid = Grid::new(vec![]).unwrap();
        let profile = build_profile(&grid);
        assert!(profile.is_empty());
        assert_eq!(profile.num_alternatives(), 0);
        assert_eq!(profile.reference_ranking(), None);
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let res = Grid::new(vec![vec![1.0, 2.0], vec![1.0]]);
        assert_eq!(
            res,
            Err(VotingErrors::RaggedTable {
                row: 2,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn inconsistent_rankings_are_rejected() {
        let dup = Profile::from_rankings(vec![(AgentId(1), alts(&[1, 1, 2]))]);
        assert_eq!(
            dup,
            Err(VotingErrors::InconsistentRanking { agent: AgentId(1) })
        );

        let short = Profile::from_rankings(vec![
            (AgentId(1), alts(&[1, 2, 3])),
            (AgentId(2), alts(&[1, 2])),
        ]);
        assert_eq!(
            short,
            Err(VotingErrors::InconsistentRanking { agent: AgentId(2) })
        );

        let gap = Profile::from_rankings(vec![(AgentId(1), alts(&[1, 4]))]);
        assert!(gap.is_err());
    }

    #[test]
    fn removing_alternatives_shrinks_every_ranking() {
        let mut profile = Profile::from_rankings(vec![
            (AgentId(1), alts(&[3, 1, 2])),
            (AgentId(2), alts(&[1, 2, 3])),
        ])
        .unwrap();
        profile.remove_alternatives(&[AlternativeId(1)].into_iter().collect());
        assert_eq!(profile.ranking(AgentId(1)), Some(alts(&[3, 2]).as_slice()));
        assert_eq!(profile.ranking(AgentId(2)), Some(alts(&[2, 3]).as_slice()));
    }
}
