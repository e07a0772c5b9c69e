//! State shared by the orchestrator and every branch thread

use std::sync::Arc;

use parking_lot::RwLock;

use crate::game::{Heuristic, Rules};

use super::stats::SearchStats;

pub(crate) struct SearchShared<R: Rules, H> {
    pub rules: R,
    heuristic: RwLock<Arc<H>>,
    pub branching: usize,
    pub pruning: bool,
    pub stats: SearchStats,
}

impl<R, H> SearchShared<R, H>
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    pub fn new(rules: R, heuristic: H, branching: usize, pruning: bool) -> Self {
        Self {
            rules,
            heuristic: RwLock::new(Arc::new(heuristic)),
            branching,
            pruning,
            stats: SearchStats::default(),
        }
    }

    /// Heuristic in effect for the next job. A job keeps the one it started with.
    pub fn heuristic(&self) -> Arc<H> {
        Arc::clone(&self.heuristic.read())
    }

    pub fn replace_heuristic(&self, heuristic: H) {
        *self.heuristic.write() = Arc::new(heuristic);
    }
}
