//! 探索統計（ノード数・葉の評価回数）

use std::sync::atomic::{AtomicU64, Ordering};

/// 全ブランチスレッドで共有するカウンタ
///
/// 各スレッドはジョブ終了時にまとめて加算する。
#[derive(Debug, Default)]
pub struct SearchStats {
    nodes: AtomicU64,
    leaves: AtomicU64,
}

impl SearchStats {
    pub fn add(&self, nodes: u64, leaves: u64) {
        self.nodes.fetch_add(nodes, Ordering::Relaxed);
        self.leaves.fetch_add(leaves, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.nodes.store(0, Ordering::Relaxed);
        self.leaves.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            nodes: self.nodes.load(Ordering::Relaxed),
            leaves: self.leaves.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatsSnapshot {
    pub nodes: u64,
    pub leaves: u64,
}
