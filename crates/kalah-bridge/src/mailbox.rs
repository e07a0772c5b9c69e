//! 容量 1 のランデブー用メールボックス
//!
//! `send` はスロットが埋まっている間、`receive` は空の間ブロックする。
//! 各メールボックスは自分専用の Mutex/Condvar を持つ。

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::{BridgeError, BridgeResult};

struct Slot<T> {
    value: Option<T>,
    closed: bool,
}

pub struct Mailbox<T> {
    slot: Mutex<Slot<T>>,
    condvar: Condvar,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                closed: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// 値を置く。前の値が受け取られるまで待つ
    ///
    /// 閉じられたメールボックスには置けない（値は破棄される）。
    pub fn send(&self, value: T) -> BridgeResult<()> {
        let mut slot = self.slot.lock();
        while slot.value.is_some() && !slot.closed {
            self.condvar.wait(&mut slot);
        }
        if slot.closed {
            return Err(BridgeError::Closed);
        }
        slot.value = Some(value);
        self.condvar.notify_all();
        Ok(())
    }

    /// 値を取り出す。値が置かれるまで待つ
    ///
    /// 閉じられた後でも、残っている値は先に受け取れる。
    pub fn receive(&self) -> BridgeResult<T> {
        let mut slot = self.slot.lock();
        loop {
            if let Some(value) = slot.value.take() {
                self.condvar.notify_all();
                return Ok(value);
            }
            if slot.closed {
                return Err(BridgeError::Closed);
            }
            self.condvar.wait(&mut slot);
        }
    }

    /// `timeout` まで待って取り出す。時間切れなら `Ok(None)`
    ///
    /// 期限が `Instant` で表せないほど長い場合は `receive` と同じく無期限に待つ。
    pub fn receive_timeout(&self, timeout: Duration) -> BridgeResult<Option<T>> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.receive().map(Some);
        };
        let mut slot = self.slot.lock();
        loop {
            if let Some(value) = slot.value.take() {
                self.condvar.notify_all();
                return Ok(Some(value));
            }
            if slot.closed {
                return Err(BridgeError::Closed);
            }
            if self.condvar.wait_until(&mut slot, deadline).timed_out() {
                // 期限と同時に置かれた値は拾う
                let value = slot.value.take();
                if value.is_some() {
                    self.condvar.notify_all();
                }
                return Ok(value);
            }
        }
    }

    /// 以後の `send` を失敗させ、待機中のスレッドを起こす
    pub fn close(&self) {
        let mut slot = self.slot.lock();
        slot.closed = true;
        self.condvar.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.slot.lock().closed
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().value.is_none()
    }
}
