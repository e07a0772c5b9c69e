// Branch threads.
// Each thread is bound to one first-ply hole for the lifetime of the pool and parks
// on its own Condvar between jobs. Request and result live behind that thread's own
// Mutex, so threads never contend with each other.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use crate::error::SearchError;
use crate::game::{Heuristic, Rules};
use crate::node::Node;
use crate::types::Score;

use super::alpha_beta::SequentialSearch;
use super::config::SearchConfig;
use super::shared::SearchShared;

/// ブランチスレッドの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerPhase {
    /// 待機中。`submit` を受け付ける
    Parked,
    /// 探索中（またはリクエスト受理済みで開始待ち）
    Running,
    /// 終了済み。以後は遷移しない
    Stopped,
}

struct SearchRequest<B> {
    node: Node<B>,
    depth: i32,
}

struct BranchState<B> {
    phase: WorkerPhase,
    /// 未処理のリクエスト。`Some` が pending フラグを兼ねる
    request: Option<SearchRequest<B>>,
    stop: bool,
    score: Score,
    panicked: bool,
}

struct BranchInner<B> {
    state: Mutex<BranchState<B>>,
    condvar: Condvar,
}

pub(crate) struct BranchThread<B> {
    hole: usize,
    inner: Arc<BranchInner<B>>,
    handle: Option<JoinHandle<()>>,
}

impl<B: Send + 'static> BranchThread<B> {
    pub(crate) fn spawn<R, H>(
        hole: usize,
        shared: Arc<SearchShared<R, H>>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError>
    where
        R: Rules<Board = B>,
        H: Heuristic<B>,
    {
        let inner = Arc::new(BranchInner {
            state: Mutex::new(BranchState {
                phase: WorkerPhase::Parked,
                request: None,
                stop: false,
                score: 0,
                panicked: false,
            }),
            condvar: Condvar::new(),
        });

        let mut builder =
            std::thread::Builder::new().name(format!("{}-{hole}", config.thread_name_prefix));
        if let Some(bytes) = config.worker_stack_bytes()? {
            builder = builder.stack_size(bytes);
        }
        let inner_clone = Arc::clone(&inner);
        let handle = builder.spawn(move || idle_loop(hole, inner_clone, shared))?;

        Ok(Self {
            hole,
            inner,
            handle: Some(handle),
        })
    }

    pub(crate) fn hole(&self) -> usize {
        self.hole
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> WorkerPhase {
        self.inner.state.lock().phase
    }

    /// 部分木の探索を依頼する
    ///
    /// Precondition: the thread is `Parked`. Submitting to a running or stopped
    /// thread is a caller bug.
    pub(crate) fn submit(&self, node: Node<B>, depth: i32) {
        let mut state = self.inner.state.lock();
        debug_assert_eq!(
            state.phase,
            WorkerPhase::Parked,
            "submit to branch thread {} while {:?}",
            self.hole,
            state.phase
        );
        state.request = Some(SearchRequest { node, depth });
        state.phase = WorkerPhase::Running;
        self.inner.condvar.notify_all();
    }

    /// 探索結果を待って受け取る
    ///
    /// Precondition: a matching `submit` was made. Without one the previous
    /// result is returned.
    pub(crate) fn collect(&self) -> Result<Score, SearchError> {
        let mut state = self.inner.state.lock();
        while state.phase == WorkerPhase::Running {
            self.inner.condvar.wait(&mut state);
        }
        if state.panicked {
            Err(SearchError::WorkerPanicked { branch: self.hole })
        } else {
            Ok(state.score)
        }
    }

    /// 停止を要求する。探索中のジョブは最後まで実行される
    pub(crate) fn request_stop(&self) {
        let mut state = self.inner.state.lock();
        state.stop = true;
        self.inner.condvar.notify_all();
    }

    /// スレッドの終了を待つ。`request_stop` の後に呼ぶ
    pub(crate) fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("branch thread {} terminated abnormally", self.hole);
            }
        }
    }
}

impl<B> Drop for BranchThread<B> {
    fn drop(&mut self) {
        {
            let mut state = self.inner.state.lock();
            state.stop = true;
            self.inner.condvar.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn idle_loop<R, H>(hole: usize, inner: Arc<BranchInner<R::Board>>, shared: Arc<SearchShared<R, H>>)
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    log::debug!("branch thread {hole} started");
    loop {
        let request = {
            let mut state = inner.state.lock();
            loop {
                // 停止要求があっても受理済みのリクエストは先に処理する
                if let Some(request) = state.request.take() {
                    break request;
                }
                if state.stop {
                    state.phase = WorkerPhase::Stopped;
                    inner.condvar.notify_all();
                    log::debug!("branch thread {hole} stopped");
                    return;
                }
                // spurious wakeup は次の周回で再判定
                inner.condvar.wait(&mut state);
            }
        };

        let outcome = run_request(hole, &shared, request);

        let mut state = inner.state.lock();
        match outcome {
            Some(score) => {
                state.score = score;
                state.panicked = false;
            }
            None => state.panicked = true,
        }
        state.phase = WorkerPhase::Parked;
        inner.condvar.notify_all();
    }
}

fn run_request<R, H>(
    hole: usize,
    shared: &SearchShared<R, H>,
    request: SearchRequest<R::Board>,
) -> Option<Score>
where
    R: Rules,
    H: Heuristic<R::Board>,
{
    let SearchRequest { mut node, depth } = request;
    let heuristic = shared.heuristic();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut search =
            SequentialSearch::new(&shared.rules, &*heuristic, shared.branching, shared.pruning);
        let score = search.run(&mut node, depth);
        (score, search.nodes(), search.leaves())
    }));

    match result {
        Ok((score, nodes, leaves)) => {
            shared.stats.add(nodes, leaves);
            log::trace!("branch {hole}: depth={depth} score={score} nodes={nodes} leaves={leaves}");
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("branch {hole} subtree:\n{}", node.render(2));
            }
            Some(score)
        }
        Err(_) => {
            log::error!("branch thread {hole} panicked during search; reporting failure");
            None
        }
    }
}
