//! 逐次 Alpha-Beta 探索
//!
//! 各ブランチスレッドが自分の担当する初手以下の部分木に対して実行する。

use crate::game::{Heuristic, Rules};
use crate::node::Node;
use crate::types::{SCORE_MAX, SCORE_MIN, Score};

use super::expand::expand;

/// 一つの部分木を探索する逐次探索器
///
/// `pruning == false` のときは alpha/beta を初期値のまま子に渡し、打ち切りもしない
/// （素の minimax と同じ値を返す）。
pub struct SequentialSearch<'a, R: Rules, H: ?Sized> {
    rules: &'a R,
    heuristic: &'a H,
    branching: usize,
    pruning: bool,
    nodes: u64,
    leaves: u64,
}

impl<'a, R, H> SequentialSearch<'a, R, H>
where
    R: Rules,
    H: Heuristic<R::Board> + ?Sized,
{
    pub fn new(rules: &'a R, heuristic: &'a H, branching: usize, pruning: bool) -> Self {
        Self {
            rules,
            heuristic,
            branching,
            pruning,
            nodes: 0,
            leaves: 0,
        }
    }

    /// 番兵の窓 (SCORE_MIN, SCORE_MAX) で探索する
    pub fn run(&mut self, node: &mut Node<R::Board>, depth: i32) -> Score {
        self.alpha_beta(node, depth, SCORE_MIN, SCORE_MAX)
    }

    /// Alpha-Beta 探索本体
    ///
    /// 終端条件は非対称: 終局なら常に評価するが、深さ切れで評価するのは最大化ノードだけ。
    /// 最小化ノードは残り深さが 0 以下でも少なくとも 1 手は展開する（終局するまで続くこともある）。
    /// 連続手番ルールとの兼ね合いで意図的にこの形を保っている。
    pub fn alpha_beta(
        &mut self,
        node: &mut Node<R::Board>,
        depth: i32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;

        if self.rules.is_game_over(node.board()) || (depth <= 0 && node.is_maximizing()) {
            self.leaves += 1;
            return node.evaluate(self.heuristic);
        }

        if !node.is_expanded() {
            expand(self.rules, node, self.branching);
        }

        let maximizing = node.is_maximizing();
        let mut best = node.polarity().weakest();
        // 再帰中に子を借用するため一度取り出して戻す
        let mut children = node.take_children();
        for child in children.iter_mut().flatten() {
            let value = self.alpha_beta(child, depth.saturating_sub(1), alpha, beta);
            if maximizing {
                best = best.max(value);
                if self.pruning {
                    alpha = alpha.max(value);
                }
            } else {
                best = best.min(value);
                if self.pruning {
                    beta = beta.min(value);
                }
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }
        node.set_children(children);
        node.record_score(best);
        best
    }

    /// 訪問したノード数
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 評価関数を呼んだ葉の数
    pub fn leaves(&self) -> u64 {
        self.leaves
    }
}
