use std::{
  mem,
  sync::{Arc, Mutex, MutexGuard},
};

use core::time::Duration;

use async_trait::async_trait;
use readyq_core_rs::counter::{
  CompletionCounterBackend, CompletionHandle, CounterValue, ReadyListener, ReadyResults, WorkUnit,
};
use tokio::{sync::Notify, task::JoinHandle, time::sleep};

/// Backend implementation of the completion counter using the Tokio runtime.
///
/// All state lives in a single mutex-guarded tri-state so that the
/// decrement-then-check transition into the terminal state happens atomically
/// and the "ready" notification fires exactly once under contention.
/// Listeners are invoked after the lock is released. Registered work units
/// are scheduled with `tokio::spawn` so that same-tick registrations settle
/// before any same-tick completion can run; constructors and all other
/// operations never block.
pub struct TokioCompletionCounterBackend<V> {
  inner: Arc<Inner<V>>,
}

struct Inner<V> {
  state:  Mutex<CounterState<V>>,
  notify: Notify,
}

enum CounterState<V> {
  Active {
    pending:   i64,
    results:   Vec<V>,
    listeners: Vec<ReadyListener<V>>,
    deadline:  Option<JoinHandle<()>>,
  },
  Terminal {
    results: ReadyResults<V>,
  },
}

impl<V> Inner<V> {
  fn lock_state(&self) -> MutexGuard<'_, CounterState<V>> {
    self.state.lock().unwrap_or_else(|err| err.into_inner())
  }
}

impl<V> TokioCompletionCounterBackend<V>
where
  V: CounterValue,
{
  fn with_pending(count: usize) -> Self {
    let state = CounterState::Active {
      pending:   i64::try_from(count).unwrap_or(i64::MAX),
      results:   Vec::new(),
      listeners: Vec::new(),
      deadline:  None,
    };
    Self { inner: Arc::new(Inner { state: Mutex::new(state), notify: Notify::new() }) }
  }

  fn arm_deadline(&self, max_wait: Duration) {
    let backend = self.clone();
    let handle = tokio::spawn(async move {
      sleep(max_wait).await;
      backend.fire_deadline();
    });
    let mut guard = self.inner.lock_state();
    if let CounterState::Active { deadline, .. } = &mut *guard {
      *deadline = Some(handle);
    }
  }

  /// Swaps the state to terminal and returns the frozen snapshot together
  /// with the listeners to notify and the deadline task to cancel. Idempotent
  /// when the state is already terminal.
  fn seal(guard: &mut MutexGuard<'_, CounterState<V>>) -> (ReadyResults<V>, Vec<ReadyListener<V>>, Option<JoinHandle<()>>) {
    let (results, listeners, deadline) = match &mut **guard {
      CounterState::Active { results, listeners, deadline, .. } => {
        let results: ReadyResults<V> = Arc::new(mem::take(results));
        (results, mem::take(listeners), deadline.take())
      },
      CounterState::Terminal { results } => (results.clone(), Vec::new(), None),
    };
    **guard = CounterState::Terminal { results: results.clone() };
    (results, listeners, deadline)
  }

  fn notify_ready(&self, results: ReadyResults<V>, listeners: Vec<ReadyListener<V>>) {
    self.inner.notify.notify_waiters();
    for listener in listeners {
      listener.invoke(results.clone());
    }
  }

  /// Deadline path: terminates with whatever results were collected so far.
  /// The expired task's own handle is dropped rather than aborted.
  fn fire_deadline(&self) {
    let mut guard = self.inner.lock_state();
    if matches!(&*guard, CounterState::Terminal { .. }) {
      return;
    }
    let (results, listeners, _deadline) = Self::seal(&mut guard);
    drop(guard);
    tracing::debug!("completion counter deadline reached; forcing termination");
    self.notify_ready(results, listeners);
  }
}

#[async_trait(?Send)]
impl<V> CompletionCounterBackend<V> for TokioCompletionCounterBackend<V>
where
  V: CounterValue,
{
  fn new() -> Self {
    Self::with_count(0)
  }

  fn with_count(count: usize) -> Self {
    Self::with_pending(count)
  }

  fn with_deadline(count: usize, max_wait: Duration) -> Self {
    let backend = Self::with_pending(count);
    if !max_wait.is_zero() {
      backend.arm_deadline(max_wait);
    }
    backend
  }

  fn register(&self) {
    let mut guard = self.inner.lock_state();
    if let CounterState::Active { pending, .. } = &mut *guard {
      *pending += 1;
    }
  }

  fn register_work(&self, work: WorkUnit<V>) {
    self.register();
    let backend = self.clone();
    let handle = CompletionHandle::new(move |value| backend.complete(value));
    tokio::spawn(async move {
      work.run(handle);
    });
  }

  fn complete(&self, value: Option<V>) {
    let mut guard = self.inner.lock_state();
    let drained = match &mut *guard {
      CounterState::Terminal { .. } => return,
      CounterState::Active { pending, results, .. } => {
        *pending -= 1;
        if let Some(value) = value {
          results.push(value);
        }
        *pending <= 0
      },
    };
    if !drained {
      return;
    }
    let (results, listeners, deadline) = Self::seal(&mut guard);
    drop(guard);
    if let Some(handle) = deadline {
      handle.abort();
    }
    self.notify_ready(results, listeners);
  }

  fn subscribe(&self, listener: ReadyListener<V>) {
    let results = {
      let mut guard = self.inner.lock_state();
      match &mut *guard {
        CounterState::Active { listeners, .. } => {
          listeners.push(listener);
          return;
        },
        CounterState::Terminal { results } => results.clone(),
      }
    };
    // Late subscription replays the cached snapshot immediately.
    listener.invoke(results);
  }

  fn is_terminal(&self) -> bool {
    matches!(&*self.inner.lock_state(), CounterState::Terminal { .. })
  }

  async fn wait(&self) -> ReadyResults<V> {
    loop {
      let notified = self.inner.notify.notified();
      {
        let guard = self.inner.lock_state();
        if let CounterState::Terminal { results } = &*guard {
          return results.clone();
        }
      }
      notified.await;
    }
  }
}

impl<V> Clone for TokioCompletionCounterBackend<V> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}
