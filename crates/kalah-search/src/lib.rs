//! # kalah-search
//!
//! Kalah エージェント用の並列 minimax 探索エンジン。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Side, Move, Score）
//! - `game`: 盤面ルールと評価関数のインターフェース
//! - `node`: 探索木のノードと極性
//! - `search`: 逐次 Alpha-Beta とブランチスレッドによる並列探索
//! - `error`: エラー型
//!
//! ```no_run
//! # use kalah_search::{Heuristic, Node, ParallelSearcher, Rules, SearchConfig, SearchError, Side};
//! # fn run<R: Rules, H: Heuristic<R::Board>>(rules: R, heuristic: H, board: R::Board) -> Result<(), SearchError> {
//! let searcher = ParallelSearcher::new(rules, heuristic, SearchConfig::default())?;
//! searcher.start()?;
//! let mut root = Node::root(Side::South, board);
//! let hole = searcher.decide(&mut root, 6)?;
//! searcher.stop();
//! # let _ = hole;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod game;
pub mod node;
pub mod search;
pub mod types;

pub use error::{ConfigError, SearchError, SearchResult};
pub use game::{Heuristic, Rules};
pub use node::{ChildSlot, Node, Polarity, TreeDump};
pub use search::{
    BranchScores, ParallelSearcher, SearchConfig, SequentialSearch, StatsSnapshot, child_polarity,
    expand,
};
pub use types::{DEFAULT_BRANCHING, Move, SCORE_MAX, SCORE_MIN, Score, Side};
