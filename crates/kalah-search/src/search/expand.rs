//! ノード展開
//!
//! オーケストレータと各ブランチスレッドで共有する。

use crate::game::Rules;
use crate::node::{ChildSlot, Node, Polarity};
use crate::types::{Move, Side};

/// 子ノードの極性を決める
///
/// 指した後の手番側が親と同じ（連続手番）なら親の極性を引き継ぎ、
/// 手番が移ったら反転する。
#[inline]
pub fn child_polarity(parent_side: Side, parent: Polarity, next: Side) -> Polarity {
    Polarity::from_maximizing((next == parent_side) == parent.is_maximizing())
}

/// `node` の子スロットを `branching` 個生成する
///
/// 穴 `1..=branching` の各手について盤面の独立したコピーに指し、
/// 非合法手の位置には `None` を置く。既存の子は置き換える。
pub fn expand<R: Rules>(rules: &R, node: &mut Node<R::Board>, branching: usize) {
    let side = node.side();
    let polarity = node.polarity();
    let mut children: Vec<ChildSlot<R::Board>> = Vec::with_capacity(branching);

    for hole in 1..=branching {
        let mv = Move::new(side, hole);
        if !rules.is_legal(node.board(), mv) {
            children.push(None);
            continue;
        }
        let mut board = node.board().clone();
        let next = rules.apply(&mut board, mv);
        children.push(Some(Node::new(child_polarity(side, polarity, next), next, board)));
    }

    debug_assert_eq!(children.len(), branching);
    node.set_children(children);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_utils::{ScriptedBoard, ScriptedRules};

    #[test]
    fn test_child_polarity_table() {
        use Polarity::*;
        use Side::*;
        // 連続手番: 極性を維持
        assert_eq!(child_polarity(South, Maximizing, South), Maximizing);
        assert_eq!(child_polarity(South, Minimizing, South), Minimizing);
        // 手番交代: 極性を反転
        assert_eq!(child_polarity(South, Maximizing, North), Minimizing);
        assert_eq!(child_polarity(North, Minimizing, South), Maximizing);
    }

    #[test]
    fn test_expand_keeps_absent_slots_aligned() {
        // 穴2が非合法、穴3は連続手番
        let rules = ScriptedRules::new()
            .edge(0, 1, 1, false)
            .edge(0, 3, 3, true)
            .edge(0, 4, 4, false);
        let mut root = Node::root(Side::South, ScriptedBoard::new(0));
        expand(&rules, &mut root, 4);

        let children = root.children();
        assert_eq!(children.len(), 4);
        assert!(children[1].is_none());

        let first = children[0].as_ref().expect("hole 1 legal");
        assert_eq!(first.side(), Side::North);
        assert_eq!(first.polarity(), Polarity::Minimizing);
        assert_eq!(first.board().id, 1);

        let extra = children[2].as_ref().expect("hole 3 legal");
        assert_eq!(extra.side(), Side::South);
        assert_eq!(extra.polarity(), Polarity::Maximizing);

        // 元の盤面は変更されない
        assert_eq!(root.board().id, 0);
    }

    #[test]
    fn test_reexpand_is_deterministic() {
        let rules = ScriptedRules::new()
            .edge(0, 2, 1, false)
            .edge(0, 5, 2, true)
            .edge(0, 7, 3, false);
        let mut root = Node::root(Side::North, ScriptedBoard::new(0));

        expand(&rules, &mut root, 7);
        let shape = |n: &Node<ScriptedBoard>| {
            n.children()
                .iter()
                .map(|c| c.as_ref().map(|c| (c.polarity(), c.side(), c.board().id)))
                .collect::<Vec<_>>()
        };
        let first = shape(&root);

        root.clear_children();
        assert!(!root.is_expanded());
        expand(&rules, &mut root, 7);
        assert_eq!(first, shape(&root));
    }
}
