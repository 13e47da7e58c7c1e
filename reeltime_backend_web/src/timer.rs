// Copyright 2026 the Reeltime Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` tick sources.
//!
//! [`TimeoutLoop`] runs an async body, waits for it to finish, and only then
//! arms a `setTimeout` for the next run. The cadence therefore drifts by the
//! body's own latency (a slow fetch delays the next tick rather than
//! overlapping it), and a body can never run concurrently with itself.
//!
//! [`after`] fires a closure once after a delay.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::Pin;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Global bindings, so re-arming never needs the `Window` object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

type TickFuture = Pin<Box<dyn Future<Output = ()>>>;
type TickBody = Box<dyn FnMut() -> TickFuture>;

/// A periodic async loop that re-arms itself after each run completes.
///
/// Create with [`TimeoutLoop::new`], then call [`start`](Self::start). The
/// first run starts immediately; each later run starts `period_ms` after the
/// previous one finished. The loop runs until [`stop`](Self::stop) is called
/// or the `TimeoutLoop` is dropped.
pub struct TimeoutLoop {
    inner: Rc<LoopInner>,
}

struct LoopInner {
    /// The JS closure registered with `setTimeout`.
    ///
    /// Set once in `start()`; it captures an `Rc` of this struct, which is
    /// released when the loop is dropped.
    closure: RefCell<Option<Closure<dyn FnMut()>>>,

    /// The user-supplied body, producing one future per run.
    body: RefCell<TickBody>,

    /// Delay between the end of one run and the start of the next.
    period_ms: i32,

    /// Whether the loop is currently running.
    running: Cell<bool>,

    /// Whether a run's future has not yet completed.
    in_flight: Cell<bool>,

    /// Number of runs started.
    runs: Cell<u64>,

    /// The ID of the pending `setTimeout`, if any.
    timeout_id: Cell<Option<i32>>,
}

impl TimeoutLoop {
    /// Creates a loop that is **not yet running**.
    pub fn new<F, Fut>(period_ms: u32, mut body: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let body: TickBody = Box::new(move || Box::pin(body()) as TickFuture);
        Self {
            inner: Rc::new(LoopInner {
                closure: RefCell::new(None),
                body: RefCell::new(body),
                period_ms: i32::try_from(period_ms).unwrap_or(i32::MAX),
                running: Cell::new(false),
                in_flight: Cell::new(false),
                runs: Cell::new(0),
                timeout_id: Cell::new(None),
            }),
        }
    }

    /// Starts the loop with an immediate first run.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        if self.inner.closure.borrow().is_none() {
            let inner = Rc::clone(&self.inner);
            let closure = Closure::wrap(Box::new(move || {
                inner.timeout_id.set(None);
                run(&inner);
            }) as Box<dyn FnMut()>);
            *self.inner.closure.borrow_mut() = Some(closure);
        }

        run(&self.inner);
    }

    /// Stops the loop.
    ///
    /// A pending timeout is cancelled; a run already in progress finishes
    /// but does not re-arm. Can be restarted with [`start`](Self::start).
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        if let Some(id) = self.inner.timeout_id.take() {
            clear_timeout(id);
        }
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Number of runs started so far.
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.inner.runs.get()
    }
}

fn run(inner: &Rc<LoopInner>) {
    if !inner.running.get() || inner.in_flight.get() {
        return;
    }
    inner.in_flight.set(true);
    inner.runs.set(inner.runs.get() + 1);

    // The borrow ends before the future is polled.
    let future = {
        let mut body = inner.body.borrow_mut();
        (*body)()
    };
    let inner = Rc::clone(inner);
    spawn_local(async move {
        future.await;
        inner.in_flight.set(false);

        // Re-arm only now: the next run waits for this one to finish.
        if inner.running.get()
            && let Some(ref closure) = *inner.closure.borrow()
        {
            let id = set_timeout(closure.as_ref().unchecked_ref(), inner.period_ms);
            inner.timeout_id.set(Some(id));
        }
    });
}

impl Drop for TimeoutLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for TimeoutLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimeoutLoop")
            .field("running", &self.inner.running.get())
            .field("in_flight", &self.inner.in_flight.get())
            .field("runs", &self.inner.runs.get())
            .field("period_ms", &self.inner.period_ms)
            .finish()
    }
}

/// Calls `f` once, `delay_ms` after now.
pub fn after(delay_ms: u32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    set_timeout(&callback, i32::try_from(delay_ms).unwrap_or(i32::MAX));
}
