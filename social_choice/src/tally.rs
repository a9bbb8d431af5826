use crate::config::AlternativeId;
use std::collections::BTreeMap;

/// Aggregated scores, ordered by alternative id.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Tally {
    scores: BTreeMap<AlternativeId, f64>,
}

impl Tally {
    /// A tally in which every given alternative starts with a score of zero.
    pub fn zeroed<I: IntoIterator<Item = AlternativeId>>(alternatives: I) -> Tally {
        Tally {
            scores: alternatives.into_iter().map(|alt| (alt, 0.0)).collect(),
        }
    }

    pub(crate) fn add(&mut self, alt: AlternativeId, points: f64) {
        *self.scores.entry(alt).or_insert(0.0) += points;
    }

    pub fn score(&self, alt: AlternativeId) -> Option<f64> {
        self.scores.get(&alt).cloned()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AlternativeId, f64)> + '_ {
        self.scores.iter().map(|(alt, s)| (*alt, *s))
    }

    pub fn max_score(&self) -> Option<f64> {
        self.scores.values().cloned().reduce(f64::max)
    }

    pub fn min_score(&self) -> Option<f64> {
        self.scores.values().cloned().reduce(f64::min)
    }

    /// The alternatives with exactly the maximum score, by increasing id.
    ///
    /// Scores are compared with `==`: two sums that differ only by rounding are not
    /// considered tied.
    pub fn winners(&self) -> Vec<AlternativeId> {
        self.with_score(self.max_score())
    }

    /// The alternatives with exactly the minimum score, by increasing id.
    pub fn losers(&self) -> Vec<AlternativeId> {
        self.with_score(self.min_score())
    }

    fn with_score(&self, target: Option<f64>) -> Vec<AlternativeId> {
        match target {
            Some(target) => self
                .scores
                .iter()
                .filter(|(_, s)| **s == target)
                .map(|(alt, _)| *alt)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl From<&Tally> for Vec<(AlternativeId, f64)> {
    fn from(tally: &Tally) -> Self {
        tally.iter().collect()
    }
}
