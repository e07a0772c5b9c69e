//! 探索木のノード
//!
//! 各ノードは盤面のコピー・手番側・極性（最大化/最小化）・子ノードを所有する。
//! 子スロットは常に分岐数と同じ長さで、i 番目のスロットが i 番目の穴の指し手に対応する。
//! 非合法手のスロットは `None`（空き）として位置を保つ。

use std::fmt;

use crate::game::Heuristic;
use crate::types::{SCORE_MAX, SCORE_MIN, Score, Side};

/// ノードの極性（探索ルートから見て最大化するか最小化するか）
///
/// 生成時に決まり、その後変わらない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Maximizing,
    Minimizing,
}

impl Polarity {
    #[inline]
    pub const fn from_maximizing(maximizing: bool) -> Self {
        if maximizing { Polarity::Maximizing } else { Polarity::Minimizing }
    }

    #[inline]
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Polarity::Maximizing)
    }

    /// この極性にとって最も弱い評価値（未評価時の番兵）
    #[inline]
    pub const fn weakest(self) -> Score {
        match self {
            Polarity::Maximizing => SCORE_MIN,
            Polarity::Minimizing => SCORE_MAX,
        }
    }

    /// `candidate` が `incumbent` より厳密に良いか（同値は既存を優先）
    #[inline]
    pub const fn prefers(self, candidate: Score, incumbent: Score) -> bool {
        match self {
            Polarity::Maximizing => candidate > incumbent,
            Polarity::Minimizing => candidate < incumbent,
        }
    }

    /// 葉の評価で評価関数に渡す側
    ///
    /// 最小化ノードでは記録された手番側の反対側から評価する。
    /// 連続手番（extra turn）があるため、ノードの手番側と探索の視点が一致しないことがある。
    #[inline]
    pub const fn perspective(self, side: Side) -> Side {
        match self {
            Polarity::Maximizing => side,
            Polarity::Minimizing => side.opposite(),
        }
    }
}

/// 子スロット。`None` は非合法手（空き）
pub type ChildSlot<B> = Option<Node<B>>;

/// 探索木のノード
#[derive(Debug, Clone)]
pub struct Node<B> {
    board: B,
    side: Side,
    polarity: Polarity,
    children: Vec<ChildSlot<B>>,
    score: Score,
}

impl<B> Node<B> {
    pub fn new(polarity: Polarity, side: Side, board: B) -> Self {
        Self {
            board,
            side,
            polarity,
            children: Vec::new(),
            score: polarity.weakest(),
        }
    }

    /// 探索ルート用: `side` の手番で最大化するノード
    pub fn root(side: Side, board: B) -> Self {
        Self::new(Polarity::Maximizing, side, board)
    }

    #[inline]
    pub fn board(&self) -> &B {
        &self.board
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[inline]
    pub fn is_maximizing(&self) -> bool {
        self.polarity.is_maximizing()
    }

    /// 子ノードが一つでも展開済みか
    ///
    /// 未展開はゲーム終了を意味しない。終局判定は `Rules::is_game_over` で行う。
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn children(&self) -> &[ChildSlot<B>] {
        &self.children
    }

    /// 子スロットを破棄して未展開に戻す
    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub(crate) fn set_children(&mut self, children: Vec<ChildSlot<B>>) {
        self.children = children;
    }

    /// 子スロットを取り出す（ルートの子を各ワーカーに渡すため）
    pub(crate) fn take_children(&mut self) -> Vec<ChildSlot<B>> {
        std::mem::take(&mut self.children)
    }

    /// キャッシュされた評価値（未評価なら極性の番兵値）
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn record_score(&mut self, score: Score) {
        self.score = score;
    }

    /// 評価関数で葉を評価し、結果をキャッシュする
    pub fn evaluate<H: Heuristic<B> + ?Sized>(&mut self, heuristic: &H) -> Score {
        let side = self.polarity.perspective(self.side);
        self.score = heuristic.evaluate(side, &self.board);
        self.score
    }

    /// `max_depth` までの木構造を文字列化する表示アダプタ
    pub fn render(&self, max_depth: usize) -> TreeDump<'_, B> {
        TreeDump {
            node: self,
            max_depth,
        }
    }

    fn write_hierarchy(
        &self,
        f: &mut fmt::Formatter<'_>,
        depth: usize,
        label: usize,
        max_depth: usize,
    ) -> fmt::Result {
        write_indent(f, depth)?;
        write!(f, "--[{label}]")?;
        if !self.is_expanded() {
            return writeln!(f, ": {}", self.score);
        }
        if depth >= max_depth {
            return writeln!(f, ": ...");
        }
        writeln!(f)?;
        for (i, slot) in self.children.iter().enumerate() {
            let hole = i + 1;
            match slot {
                Some(child) => child.write_hierarchy(f, depth + 1, hole, max_depth)?,
                None => {
                    write_indent(f, depth + 1)?;
                    writeln!(f, "--[{hole}]: empty")?;
                }
            }
        }
        Ok(())
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(" |")?;
    }
    Ok(())
}

/// [`Node::render`] の戻り値
pub struct TreeDump<'a, B> {
    node: &'a Node<B>,
    max_depth: usize,
}

impl<B> fmt::Display for TreeDump<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.write_hierarchy(f, 0, 0, self.max_depth)
    }
}
