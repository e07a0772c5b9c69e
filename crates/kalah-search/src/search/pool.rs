//! 並列探索のオーケストレータ
//!
//! ルートの初手ごとに専用のブランチスレッドを一本ずつ持ち、`decide` のたびに
//! 各スレッドへ担当の子ノードを配って結果を集める。スレッドは `start` から `stop`
//! まで生き続け、ジョブ間は自分の Condvar で待機する。

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{SearchError, SearchResult};
use crate::game::{Heuristic, Rules};
use crate::node::Node;
use crate::types::Score;

use super::config::SearchConfig;
use super::expand::expand;
use super::scores::BranchScores;
use super::shared::SearchShared;
use super::stats::StatsSnapshot;
use super::thread::BranchThread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

/// 初手ごとのブランチスレッドで探索する並列探索器
///
/// ```text
/// new ──start──▶ running ──stop──▶ stopped
/// ```
///
/// `decide` は running の間だけ受け付ける。一度 stop したら再開できない。
pub struct ParallelSearcher<R: Rules, H: Heuristic<R::Board>> {
    shared: Arc<SearchShared<R, H>>,
    config: SearchConfig,
    lifecycle: Mutex<Lifecycle>,
    branches: Mutex<Vec<BranchThread<R::Board>>>,
    /// 同時に一つの `decide` だけがスレッドへ配る
    dispatch: Mutex<()>,
}

impl<R, H> ParallelSearcher<R, H>
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    pub fn new(rules: R, heuristic: H, config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        let shared = Arc::new(SearchShared::new(
            rules,
            heuristic,
            config.branching,
            config.pruning,
        ));
        Ok(Self {
            shared,
            config,
            lifecycle: Mutex::new(Lifecycle::Idle),
            branches: Mutex::new(Vec::new()),
            dispatch: Mutex::new(()),
        })
    }

    /// ブランチスレッドを分岐数だけ起動する
    pub fn start(&self) -> SearchResult<()> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running => return Err(SearchError::AlreadyStarted),
            Lifecycle::Stopped => return Err(SearchError::Stopped),
            Lifecycle::Idle => {}
        }

        // 途中で失敗した場合、起動済みのスレッドは Drop で止まる
        let branches = (1..=self.config.branching)
            .map(|hole| BranchThread::spawn(hole, Arc::clone(&self.shared), &self.config))
            .collect::<SearchResult<Vec<_>>>()?;

        log::debug!(
            "started {} branch threads (pruning={})",
            branches.len(),
            self.config.pruning
        );
        *self.branches.lock() = branches;
        *lifecycle = Lifecycle::Running;
        Ok(())
    }

    /// 全スレッドに停止を伝えて終了を待つ
    ///
    /// 探索中のスレッドは現在のジョブを終えてから止まる。二回目以降の呼び出しは何もしない。
    pub fn stop(&self) {
        {
            let mut lifecycle = self.lifecycle.lock();
            if *lifecycle == Lifecycle::Stopped {
                return;
            }
            *lifecycle = Lifecycle::Stopped;
        }

        let mut branches = std::mem::take(&mut *self.branches.lock());
        for branch in &branches {
            branch.request_stop();
        }
        for branch in &mut branches {
            branch.join();
        }
        log::debug!("stopped {} branch threads", branches.len());
    }

    pub fn is_running(&self) -> bool {
        *self.lifecycle.lock() == Lifecycle::Running
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 評価関数を差し替える。実行中のジョブは開始時の評価関数を使い続ける
    pub fn set_heuristic(&self, heuristic: H) {
        self.shared.replace_heuristic(heuristic);
    }

    /// 直近の `decide` の探索統計
    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// 最善の初手（1 始まりの穴番号）を返す
    ///
    /// ルートの極性に従って最大/最小を選び、同点なら小さい穴を優先する。
    pub fn decide(&self, root: &mut Node<R::Board>, depth: i32) -> SearchResult<usize> {
        let scores = self.decide_all(root, depth)?;
        let (hole, score) = scores
            .best(root.polarity())
            .ok_or(SearchError::NoLegalMove)?;
        log::debug!(
            "decided hole {hole} (score={score}, depth={depth}, nodes={})",
            self.shared.stats.snapshot().nodes
        );
        Ok(hole)
    }

    /// 設定の探索深さで `decide` する
    pub fn choose_move(&self, root: &mut Node<R::Board>) -> SearchResult<usize> {
        self.decide(root, self.config.depth)
    }

    /// 初手ごとの評価値をすべて返す
    ///
    /// 非合法手は `None`。合法手が一つもなければ全て `None` になる（エラーにはしない）。
    pub fn decide_all(&self, root: &mut Node<R::Board>, depth: i32) -> SearchResult<BranchScores> {
        match *self.lifecycle.lock() {
            Lifecycle::Idle => return Err(SearchError::NotStarted),
            Lifecycle::Stopped => return Err(SearchError::Stopped),
            Lifecycle::Running => {}
        }

        let _dispatch = self.dispatch.lock();
        let branches = self.branches.lock();
        if branches.is_empty() {
            // decide の途中で stop された
            return Err(SearchError::Stopped);
        }

        self.shared.stats.reset();
        if !root.is_expanded() {
            expand(&self.shared.rules, root, self.config.branching);
        }

        let mut children = root.take_children();
        let mut submitted = vec![false; children.len()];
        for ((slot, branch), sent) in children.iter_mut().zip(branches.iter()).zip(&mut submitted) {
            if let Some(child) = slot.take() {
                log::trace!("dispatching hole {} at depth {depth}", branch.hole());
                branch.submit(child, depth);
                *sent = true;
            }
        }

        // 全スレッドの結果を集めてから最初のエラーを返す
        let mut scores: Vec<Option<Score>> = Vec::with_capacity(children.len());
        let mut first_error = None;
        for (branch, sent) in branches.iter().zip(&submitted) {
            if !sent {
                scores.push(None);
                continue;
            }
            match branch.collect() {
                Ok(score) => scores.push(Some(score)),
                Err(err) => {
                    scores.push(None);
                    first_error.get_or_insert(err);
                }
            }
        }
        scores.resize(children.len(), None);

        // 部分木はスレッドに渡したので、ルートは未展開に戻しておく
        drop(children);
        root.clear_children();
        let scores = BranchScores::new(scores);
        if let Some((_, best)) = scores.best(root.polarity()) {
            root.record_score(best);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(scores),
        }
    }
}

impl<R, H> Drop for ParallelSearcher<R, H>
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    fn drop(&mut self) {
        self.stop();
    }
}
