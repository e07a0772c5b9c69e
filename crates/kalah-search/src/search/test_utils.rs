//! Scripted game doubles for search unit tests
//!
//! Positions are plain ids; the game graph is declared edge by edge. A position
//! without outgoing edges is game over.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::game::{Heuristic, Rules};
use crate::types::{Move, Score, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedBoard {
    pub id: u32,
}

impl ScriptedBoard {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedRules {
    edges: HashMap<(u32, usize), (u32, bool)>,
    sources: HashSet<u32>,
}

impl ScriptedRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// `from` の穴 `hole` を指すと `to` に移る。`extra_turn` なら同じ側がもう一度指す
    pub fn edge(mut self, from: u32, hole: usize, to: u32, extra_turn: bool) -> Self {
        self.edges.insert((from, hole), (to, extra_turn));
        self.sources.insert(from);
        self
    }
}

impl Rules for ScriptedRules {
    type Board = ScriptedBoard;

    fn is_legal(&self, board: &ScriptedBoard, mv: Move) -> bool {
        self.edges.contains_key(&(board.id, mv.hole))
    }

    fn apply(&self, board: &mut ScriptedBoard, mv: Move) -> Side {
        let Some(&(to, extra_turn)) = self.edges.get(&(board.id, mv.hole)) else {
            panic!("illegal scripted move {mv} from {}", board.id);
        };
        board.id = to;
        if extra_turn { mv.side } else { mv.side.opposite() }
    }

    fn is_game_over(&self, board: &ScriptedBoard) -> bool {
        !self.sources.contains(&board.id)
    }
}

/// 一度だけ立つフラグ。評価が始まったことを別スレッドに知らせる
#[derive(Debug, Default)]
pub struct StartSignal {
    started: Mutex<bool>,
    condvar: Condvar,
}

impl StartSignal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notify(&self) {
        *self.started.lock() = true;
        self.condvar.notify_all();
    }

    pub fn wait(&self) {
        let mut started = self.started.lock();
        while !*started {
            self.condvar.wait(&mut started);
        }
    }
}

/// South 視点のスコア表。North から見ると符号が反転する
#[derive(Debug, Default)]
pub struct ScriptedHeuristic {
    scores: HashMap<u32, Score>,
    calls: Mutex<Vec<(u32, Side)>>,
    delay: Option<Duration>,
    panic_on: Option<u32>,
    on_evaluate: Option<Arc<StartSignal>>,
}

impl ScriptedHeuristic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(mut self, id: u32, south_score: Score) -> Self {
        self.scores.insert(id, south_score);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn panicking_on(mut self, id: u32) -> Self {
        self.panic_on = Some(id);
        self
    }

    /// 評価が始まるたびに `signal` を立てる
    pub fn signalling(mut self, signal: Arc<StartSignal>) -> Self {
        self.on_evaluate = Some(signal);
        self
    }

    /// 評価関数が呼ばれた (局面 id, 視点) の記録
    pub fn calls(&self) -> Vec<(u32, Side)> {
        self.calls.lock().clone()
    }
}

impl Heuristic<ScriptedBoard> for ScriptedHeuristic {
    fn evaluate(&self, side: Side, board: &ScriptedBoard) -> Score {
        self.calls.lock().push((board.id, side));
        if let Some(signal) = &self.on_evaluate {
            signal.notify();
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.panic_on == Some(board.id) {
            panic!("scripted heuristic failure at {}", board.id);
        }
        let south = self.scores.get(&board.id).copied().unwrap_or(0);
        match side {
            Side::South => south,
            Side::North => -south,
        }
    }
}
