//! 統合テスト・ベンチ用の合成ゲーム
//!
//! 盤面は 64bit のシードだけで表し、合法性・連続手番・終局・評価値をすべてシードの
//! ハッシュから決める。実際の Kalah のルールは使わないが、探索から見える性質
//! （非合法手、連続手番、途中終局）はすべて現れる。

#![allow(dead_code)]

use parking_lot::Mutex;

use kalah_search::{Heuristic, Move, Rules, SCORE_MAX, SCORE_MIN, Score, Side};

/// splitmix64 の最終段
pub fn mix(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashBoard {
    pub seed: u64,
    pub ply: u32,
}

impl HashBoard {
    pub fn new(seed: u64) -> Self {
        Self { seed, ply: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct HashRules {
    pub branching: usize,
    pub max_ply: u32,
    /// ルート（ply 0）でだけ非合法になる穴
    pub blocked_root_holes: Vec<usize>,
}

impl HashRules {
    pub fn new(branching: usize, max_ply: u32) -> Self {
        Self {
            branching,
            max_ply,
            blocked_root_holes: Vec::new(),
        }
    }

    pub fn blocking_root(mut self, hole: usize) -> Self {
        self.blocked_root_holes.push(hole);
        self
    }

    fn successor(board: &HashBoard, hole: usize) -> u64 {
        mix(board.seed ^ (hole as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }
}

impl Rules for HashRules {
    type Board = HashBoard;

    fn is_legal(&self, board: &HashBoard, mv: Move) -> bool {
        if mv.hole == 0 || mv.hole > self.branching {
            return false;
        }
        if board.ply == 0 {
            return !self.blocked_root_holes.contains(&mv.hole);
        }
        // 途中の局面ではおよそ 1/6 の手が非合法
        Self::successor(board, mv.hole) % 6 != 0
    }

    fn apply(&self, board: &mut HashBoard, mv: Move) -> Side {
        let next = Self::successor(board, mv.hole);
        board.seed = next;
        board.ply += 1;
        // およそ 1/4 の手で連続手番
        if (next >> 8) % 4 == 0 { mv.side } else { mv.side.opposite() }
    }

    fn is_game_over(&self, board: &HashBoard) -> bool {
        board.ply >= self.max_ply || (board.ply > 0 && (board.seed >> 16) % 11 == 0)
    }
}

/// South 視点で [-100, 100] の値を返す評価関数
#[derive(Debug, Default)]
pub struct HashHeuristic {
    /// 値をずらして評価関数の差し替えを確認する
    pub offset: Score,
}

pub fn south_value(board: &HashBoard) -> Score {
    ((board.seed >> 24) % 201) as Score - 100
}

impl Heuristic<HashBoard> for HashHeuristic {
    fn evaluate(&self, side: Side, board: &HashBoard) -> Score {
        let value = south_value(board) + self.offset;
        match side {
            Side::South => value,
            Side::North => -value,
        }
    }
}

/// 呼び出しを記録する評価関数
#[derive(Debug, Default)]
pub struct RecordingHeuristic {
    calls: Mutex<Vec<(Side, HashBoard)>>,
}

impl RecordingHeuristic {
    pub fn calls(&self) -> Vec<(Side, HashBoard)> {
        self.calls.lock().clone()
    }
}

impl Heuristic<HashBoard> for RecordingHeuristic {
    fn evaluate(&self, side: Side, board: &HashBoard) -> Score {
        self.calls.lock().push((side, board.clone()));
        HashHeuristic::default().evaluate(side, board)
    }
}

/// 枝刈りなし minimax の参照実装
///
/// 終局なら常に評価、深さ切れで評価するのは最大化ノードだけ。最小化ノードの評価は
/// 手番の反対側の視点で行う。
pub fn reference_minimax<R, H>(
    rules: &R,
    heuristic: &H,
    board: &R::Board,
    side: Side,
    maximizing: bool,
    depth: i32,
    branching: usize,
) -> Score
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    if rules.is_game_over(board) || (depth <= 0 && maximizing) {
        let perspective = if maximizing { side } else { side.opposite() };
        return heuristic.evaluate(perspective, board);
    }

    let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };
    for hole in 1..=branching {
        let mv = Move::new(side, hole);
        if !rules.is_legal(board, mv) {
            continue;
        }
        let mut child = board.clone();
        let next = rules.apply(&mut child, mv);
        let child_maximizing = (next == side) == maximizing;
        let value = reference_minimax(
            rules,
            heuristic,
            &child,
            next,
            child_maximizing,
            depth - 1,
            branching,
        );
        best = if maximizing { best.max(value) } else { best.min(value) };
    }
    best
}

/// ルートの各初手について参照実装の値を返す（非合法手は `None`）
pub fn reference_branch_scores<R, H>(
    rules: &R,
    heuristic: &H,
    root: &R::Board,
    side: Side,
    depth: i32,
    branching: usize,
) -> Vec<Option<Score>>
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    (1..=branching)
        .map(|hole| {
            let mv = Move::new(side, hole);
            if !rules.is_legal(root, mv) {
                return None;
            }
            let mut child = root.clone();
            let next = rules.apply(&mut child, mv);
            Some(reference_minimax(
                rules,
                heuristic,
                &child,
                next,
                next == side,
                depth,
                branching,
            ))
        })
        .collect()
}

/// テスト中のログ出力（RUST_LOG で制御）
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
