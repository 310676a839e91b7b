//! The scheduling abstraction: [`Deferred`] values and the pluggable
//! [`Runtime`] trait with its blocking and thread-pool implementations.
//!
//! Only resolvers may block; field collection and value completion run on
//! the thread that drives them. Sibling fields of one selection set are
//! scheduled through [`Runtime::gather_values`], which preserves
//! positional order regardless of completion order.

use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;

/// Marker returned through completion when a null reached a non-null
/// position: the enclosing nullable field absorbs it. The corresponding
/// error has already been recorded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropagateNull;

/// The output of one scheduled field task.
pub type TaskOutput = Result<JsonValue, PropagateNull>;

/// A scheduled unit of work. The `'env` lifetime lets tasks borrow from
/// the execution state that outlives the `gather_values` call.
pub type Task<'env> = Box<dyn FnOnce() -> TaskOutput + Send + 'env>;

// =============================================================================
// Deferred
// =============================================================================

enum DeferredState<T> {
    /// Completion callbacks registered before the value arrived.
    Pending(Vec<Box<dyn FnOnce(&T) + Send>>),
    Ready(T),
}

/// An asynchronous value: a shared-state promise with blocking `wait`,
/// continuation `chain`, and completion callbacks.
pub struct Deferred<T> {
    state: Arc<(Mutex<DeferredState<T>>, Condvar)>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Send + 'static> Deferred<T> {
    /// A new, pending deferred.
    pub fn new() -> Self {
        Self {
            state: Arc::new((Mutex::new(DeferredState::Pending(vec![])), Condvar::new())),
        }
    }

    /// A deferred that is already complete.
    pub fn ready(value: T) -> Self {
        Self {
            state: Arc::new((Mutex::new(DeferredState::Ready(value)), Condvar::new())),
        }
    }

    /// Completes this deferred, running any registered callbacks.
    ///
    /// Completing twice is a programming error and panics.
    pub fn resolve(&self, value: T)
    where
        T: Clone,
    {
        let (lock, condvar) = &*self.state;
        let (callbacks, snapshot) = {
            let mut state = lock.lock().expect("deferred lock poisoned");
            match std::mem::replace(&mut *state, DeferredState::Pending(vec![])) {
                DeferredState::Pending(callbacks) => {
                    // Snapshot for the callbacks so they run outside the
                    // lock; a callback may register further callbacks on
                    // this same deferred.
                    let snapshot = if callbacks.is_empty() {
                        None
                    } else {
                        Some(value.clone())
                    };
                    *state = DeferredState::Ready(value);
                    (callbacks, snapshot)
                }
                DeferredState::Ready(_) => panic!("deferred resolved twice"),
            }
        };
        condvar.notify_all();
        if let Some(snapshot) = snapshot {
            for callback in callbacks {
                callback(&snapshot);
            }
        }
    }

    /// Registers a callback invoked with the value once complete. Runs
    /// immediately when the value is already there.
    pub fn on_complete(&self, callback: impl FnOnce(&T) + Send + 'static) {
        let (lock, _) = &*self.state;
        let mut state = lock.lock().expect("deferred lock poisoned");
        match &mut *state {
            DeferredState::Pending(callbacks) => callbacks.push(Box::new(callback)),
            DeferredState::Ready(value) => callback(value),
        }
    }

    /// Blocks until the value is available.
    pub fn wait(&self) -> T
    where
        T: Clone,
    {
        let (lock, condvar) = &*self.state;
        let mut state = lock.lock().expect("deferred lock poisoned");
        loop {
            match &*state {
                DeferredState::Ready(value) => return value.clone(),
                DeferredState::Pending(_) => {
                    state = condvar.wait(state).expect("deferred lock poisoned");
                }
            }
        }
    }

    /// Attaches a continuation, producing a new deferred for its result.
    pub fn chain<U: Clone + Send + 'static>(
        &self,
        f: impl FnOnce(&T) -> U + Send + 'static,
    ) -> Deferred<U> {
        let next = Deferred::new();
        let next_clone = next.clone();
        self.on_complete(move |value| next_clone.resolve(f(value)));
        next
    }
}

impl<T: Send + 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Runtime
// =============================================================================

/// A pluggable scheduler for execution work.
///
/// `submit` schedules fire-and-forget work (used to run whole query
/// pipelines off-thread); `gather_values` runs a batch of sibling field
/// tasks and returns their results in task order; completion order never
/// leaks into the response.
///
/// The value-level combinators sit on [`Deferred`] itself:
/// [`Deferred::ready`] lifts a plain value, [`Deferred::chain`] attaches
/// a continuation, and [`Deferred::wait`] blocks at the edge of the
/// public API.
pub trait Runtime: Send + Sync {
    /// Schedules `task` for eventual execution.
    fn submit(&self, task: Box<dyn FnOnce() + Send>);

    /// Runs all tasks, possibly in parallel, and returns their outputs in
    /// the order the tasks were given. The first failure in the batch is
    /// what the caller propagates.
    fn gather_values<'env>(&self, tasks: Vec<Task<'env>>) -> Vec<TaskOutput>;
}

/// Runs a closure through a runtime, exposing its result as a
/// [`Deferred`].
pub fn submit_deferred<T: Clone + Send + 'static>(
    runtime: &dyn Runtime,
    task: impl FnOnce() -> T + Send + 'static,
) -> Deferred<T> {
    let deferred = Deferred::new();
    let completion = deferred.clone();
    runtime.submit(Box::new(move || completion.resolve(task())));
    deferred
}

/// The synchronous runtime: everything runs in place on the caller's
/// thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockingRuntime;

impl Runtime for BlockingRuntime {
    fn submit(&self, task: Box<dyn FnOnce() + Send>) {
        task();
    }

    fn gather_values<'env>(&self, tasks: Vec<Task<'env>>) -> Vec<TaskOutput> {
        tasks.into_iter().map(|task| task()).collect()
    }
}

/// A bounded worker-pool runtime backed by rayon.
pub struct ThreadPoolRuntime {
    pool: rayon::ThreadPool,
}

impl ThreadPoolRuntime {
    /// Builds a pool with the given number of worker threads.
    pub fn new(num_threads: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|idx| format!("graphquill-worker-{idx}"))
            .build()
            .expect("thread pool construction failed");
        Self { pool }
    }

    /// A pool sized to the number of available CPUs.
    pub fn with_default_size() -> Self {
        Self::new(std::thread::available_parallelism().map_or(4, |n| n.get()))
    }
}

impl Runtime for ThreadPoolRuntime {
    fn submit(&self, task: Box<dyn FnOnce() + Send>) {
        self.pool.spawn(task);
    }

    fn gather_values<'env>(&self, tasks: Vec<Task<'env>>) -> Vec<TaskOutput> {
        let slots: Vec<Mutex<Option<TaskOutput>>> =
            tasks.iter().map(|_| Mutex::new(None)).collect();
        self.pool.scope(|scope| {
            for (task, slot) in tasks.into_iter().zip(&slots) {
                scope.spawn(move |_| {
                    let output = task();
                    *slot.lock().expect("task slot lock poisoned") = Some(output);
                });
            }
        });
        slots
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .expect("task slot lock poisoned")
                    .expect("task completed within scope")
            })
            .collect()
    }
}
