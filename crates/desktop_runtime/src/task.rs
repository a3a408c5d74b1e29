//! Detached task spawning for boundary work (content loads, preference writes, theme apply).
//!
//! Browser builds hand futures to the page's task loop. Native builds have no event loop, so
//! detached futures go into a thread-local queue that is driven in place until every task has
//! either finished or is waiting on something outside the process. Driving never enters an
//! executor, so spawning from inside a `block_on` is fine.

use std::future::Future;

/// Runs `future` without blocking the caller's state.
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    leptos::spawn_local(future);
    #[cfg(not(target_arch = "wasm32"))]
    native::spawn(future);
}

/// Polls queued native tasks until none can make progress. Returns how many are still waiting.
///
/// Spawning already drives the queue; call this after an external wake-up (a timer, a channel
/// send from another thread) to finish the tasks that were waiting on it. Always `0` in the
/// browser.
pub fn run_until_stalled() -> usize {
    #[cfg(target_arch = "wasm32")]
    {
        0
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        native::drive()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{
        cell::{Cell, RefCell},
        future::Future,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        task::{Context, Poll},
    };

    use futures::{
        future::LocalBoxFuture,
        stream::{FuturesUnordered, StreamExt},
        task::{waker, ArcWake},
        FutureExt,
    };

    thread_local! {
        static TASKS: RefCell<FuturesUnordered<LocalBoxFuture<'static, ()>>> =
            RefCell::new(FuturesUnordered::new());
        static INCOMING: RefCell<Vec<LocalBoxFuture<'static, ()>>> = const { RefCell::new(Vec::new()) };
        static DRIVING: Cell<bool> = const { Cell::new(false) };
    }

    /// Set whenever a queued task asks to be polled again.
    #[derive(Default)]
    struct WokenFlag(AtomicBool);

    impl ArcWake for WokenFlag {
        fn wake_by_ref(arc_self: &Arc<Self>) {
            arc_self.0.store(true, Ordering::SeqCst);
        }
    }

    pub(super) fn spawn<F>(future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        INCOMING.with(|queue| queue.borrow_mut().push(future.boxed_local()));
        drive();
    }

    pub(super) fn drive() -> usize {
        // Tasks spawned while a task is being polled land in INCOMING and are picked up by the
        // outer loop.
        if DRIVING.with(|driving| driving.replace(true)) {
            return TASKS.with(|tasks| tasks.borrow().len());
        }

        let mut tasks = TASKS.with(|tasks| std::mem::take(&mut *tasks.borrow_mut()));
        let flag = Arc::new(WokenFlag::default());
        let waker = waker(flag.clone());
        let mut cx = Context::from_waker(&waker);

        loop {
            tasks.extend(INCOMING.with(|queue| std::mem::take(&mut *queue.borrow_mut())));
            if tasks.is_empty() {
                break;
            }
            flag.0.store(false, Ordering::SeqCst);
            match tasks.poll_next_unpin(&mut cx) {
                Poll::Ready(_) => continue,
                Poll::Pending => {
                    let woken = flag.0.load(Ordering::SeqCst);
                    let spawned = INCOMING.with(|queue| !queue.borrow().is_empty());
                    if !woken && !spawned {
                        break;
                    }
                }
            }
        }

        let waiting = tasks.len();
        if waiting > 0 {
            leptos::logging::log!("detached tasks: {waiting} waiting on an external wake-up");
        }
        TASKS.with(|slot| slot.borrow_mut().extend(tasks));
        DRIVING.with(|driving| driving.set(false));
        waiting
    }
}
