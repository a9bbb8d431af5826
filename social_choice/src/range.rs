use crate::builder::{build_profile, Table};
use crate::config::*;
use crate::positional::pick_winner;
use crate::tally::Tally;
use crate::tiebreak::TieBreaker;

use log::debug;

/// Sums the values of every column over all the rows.
pub fn range_tally(table: &dyn Table) -> Tally {
    let mut tally = Tally::zeroed((1..=table.column_count() as u32).map(AlternativeId));
    for row in 1..=table.row_count() {
        for col in 1..=table.column_count() {
            tally.add(AlternativeId(col as u32), table.cell(row, col));
        }
    }
    debug!("range_tally: {:?}", tally);
    tally
}

/// Range voting: the column with the largest sum of values wins.
///
/// The rankings derived from the table are only used to break ties with
/// [TieBreakMode::Agent].
pub fn range_voting(
    table: &dyn Table,
    tiebreak: &mut TieBreaker,
) -> Result<AlternativeId, VotingErrors> {
    let profile = build_profile(table);
    let tally = range_tally(table);
    pick_winner("range_voting", &profile, &tally, tiebreak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Grid;

    #[test]
    fn largest_column_sum_wins() {
        let grid = Grid::new(vec![
            vec![5.0, 3.0, 0.0],
            vec![0.0, 4.0, 1.0],
            vec![1.0, 2.0, 9.0],
        ])
        .unwrap();
        let t = range_tally(&grid);
        assert_eq!(t.score(AlternativeId(1)), Some(6.0));
        assert_eq!(t.score(AlternativeId(2)), Some(9.0));
        assert_eq!(t.score(AlternativeId(3)), Some(10.0));
        assert_eq!(
            range_voting(&grid, &mut TieBreaker::default()),
            Ok(AlternativeId(3))
        );
    }

    #[test]
    fn ties_use_the_rankings_of_the_table() {
        // Both columns sum to 4. Agent 2 prefers column 1.
        let grid = Grid::new(vec![vec![1.0, 3.0], vec![3.0, 1.0]]).unwrap();
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(2)), 0);
        assert_eq!(range_voting(&grid, &mut tb), Ok(AlternativeId(1)));
        let mut tb = TieBreaker::with_seed(TieBreakMode::Agent(AgentId(1)), 0);
        assert_eq!(range_voting(&grid, &mut tb), Ok(AlternativeId(2)));
        assert_eq!(
            range_voting(&grid, &mut TieBreaker::default()),
            Ok(AlternativeId(2))
        );
    }

    #[test]
    fn no_columns() {
        let grid = Grid::new(vec![vec![], vec![]]).unwrap();
        assert_eq!(
            range_voting(&grid, &mut TieBreaker::default()),
            Err(VotingErrors::EmptyElection {})
        );
    }
}
