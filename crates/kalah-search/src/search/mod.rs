//! 探索モジュール
//!
//! - `expand`: 子ノードの生成と極性の決定
//! - `alpha_beta`: ブランチスレッド内で動く逐次 Alpha-Beta 探索
//! - `thread`: 初手ごとに固定されたブランチスレッド
//! - `pool`: ブランチスレッドを束ねるオーケストレータ

pub mod alpha_beta;
pub mod config;
pub mod expand;
pub mod pool;
pub mod scores;
mod shared;
pub mod stats;
mod thread;

#[cfg(test)]
mod test_utils;

pub use alpha_beta::SequentialSearch;
pub use config::SearchConfig;
pub use expand::{child_polarity, expand};
pub use pool::ParallelSearcher;
pub use scores::BranchScores;
pub use stats::{SearchStats, StatsSnapshot};
