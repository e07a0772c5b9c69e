//! Per-branch scores of one decision

use serde::Serialize;

use crate::node::Polarity;
use crate::types::Score;

/// Scores of every first-ply branch, indexed by hole
///
/// Slot `hole - 1` is `None` when the move was illegal and therefore never searched.
/// Serializes as a plain array with `null` for absent branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BranchScores {
    scores: Vec<Option<Score>>,
}

impl BranchScores {
    pub fn new(scores: Vec<Option<Score>>) -> Self {
        Self { scores }
    }

    /// Number of branches (the branching factor), absent ones included
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of `hole` (1-based). `None` for absent or out-of-range holes.
    pub fn get(&self, hole: usize) -> Option<Score> {
        hole.checked_sub(1).and_then(|i| self.scores.get(i).copied().flatten())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Option<Score>] {
        &self.scores
    }

    /// `(hole, score)` of every searched branch in hole order
    pub fn searched(&self) -> impl Iterator<Item = (usize, Score)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|s| (i + 1, s)))
    }

    /// Best branch for a root of the given polarity
    ///
    /// Scans in hole order and only replaces the incumbent with a strictly better
    /// score, so ties resolve to the lowest hole. `None` when nothing was searched.
    pub fn best(&self, polarity: Polarity) -> Option<(usize, Score)> {
        self.searched().fold(None, |best, (hole, score)| match best {
            Some((_, incumbent)) if !polarity.prefers(score, incumbent) => best,
            _ => Some((hole, score)),
        })
    }

    /// Dense vector with absent branches filled by `neutral`
    pub fn to_dense(&self, neutral: Score) -> Vec<Score> {
        self.scores.iter().map(|s| s.unwrap_or(neutral)).collect()
    }
}
