//! 基本型（Side, Move, Score）

mod side;

pub use side::Side;

/// 評価値
pub type Score = i32;

/// 最も弱い評価値（最大化ノードの初期値、alpha の初期値）
pub const SCORE_MIN: Score = Score::MIN;

/// 最も強い評価値（最小化ノードの初期値、beta の初期値）
pub const SCORE_MAX: Score = Score::MAX;

/// Kalah の標準の穴の数（= 分岐数）
pub const DEFAULT_BRANCHING: usize = 7;

/// 指し手: どちらの側が、どの穴（1 始まり）から種をまくか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub side: Side,
    pub hole: usize,
}

impl Move {
    #[inline]
    pub const fn new(side: Side, hole: usize) -> Self {
        Self { side, hole }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.side, self.hole)
    }
}
