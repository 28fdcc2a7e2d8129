use core::{marker::PhantomData, time::Duration};

use super::{
  completion_counter_backend::CompletionCounterBackend,
  completion_handle::CompletionHandle,
  counter_value::CounterValue,
  ready_listener::{ReadyListener, ReadyResults},
  work_unit::WorkUnit,
};

/// Completion-counting synchronization primitive.
///
/// Tracks a pending count of outstanding operations; each `register` raises
/// it and each `complete` lowers it. When the net count reaches zero or below
/// (or an optional deadline lapses first), the counter terminates and every
/// subscribed listener is invoked exactly once with the collected results in
/// arrival order. A terminated counter is frozen: further registrations and
/// completions are no-ops.
pub struct CompletionCounter<V, B>
where
  V: CounterValue,
  B: CompletionCounterBackend<V>, {
  backend: B,
  _values: PhantomData<V>,
}

impl<V, B> CompletionCounter<V, B>
where
  V: CounterValue,
  B: CompletionCounterBackend<V>,
{
  /// Creates a counter with the pending count initialised to 0.
  #[must_use]
  pub fn new() -> Self {
    Self { backend: B::new(), _values: PhantomData }
  }

  /// Creates a counter with the specified initial pending count.
  #[must_use]
  pub fn with_count(count: usize) -> Self {
    Self { backend: B::with_count(count), _values: PhantomData }
  }

  /// Creates a counter that additionally terminates once `max_wait` elapses,
  /// notifying subscribers with whatever results were collected by then.
  #[must_use]
  pub fn with_deadline(count: usize, max_wait: Duration) -> Self {
    Self { backend: B::with_deadline(count, max_wait), _values: PhantomData }
  }

  /// Adds one expected completion. No-op once terminal.
  pub fn register(&self) {
    self.backend.register();
  }

  /// Adds one expected completion and schedules `work` asynchronously.
  pub fn register_work(&self, work: WorkUnit<V>) {
    self.backend.register_work(work);
  }

  /// Convenience form of [`Self::register_work`] taking a bare closure.
  pub fn register_fn(&self, work: impl FnOnce(CompletionHandle<V>) + Send + 'static) {
    self.backend.register_work(WorkUnit::new(work));
  }

  /// Records one completion, collecting `value` when present.
  pub fn complete(&self, value: Option<V>) {
    self.backend.complete(value);
  }

  /// Subscribes a listener to the terminal "ready" notification.
  ///
  /// Listeners are invoked in subscription order, each with the same results
  /// snapshot. Subscribing after termination replays the cached snapshot to
  /// the listener immediately.
  pub fn subscribe(&self, listener: ReadyListener<V>) {
    self.backend.subscribe(listener);
  }

  /// Convenience form of [`Self::subscribe`] taking a bare closure.
  pub fn subscribe_fn(&self, f: impl FnOnce(ReadyResults<V>) + Send + 'static) {
    self.backend.subscribe(ReadyListener::new(f));
  }

  /// Returns `true` once the counter has terminated.
  #[must_use]
  pub fn is_terminal(&self) -> bool {
    self.backend.is_terminal()
  }

  /// Waits until the counter terminates and returns the results snapshot.
  pub async fn wait(&self) -> ReadyResults<V> {
    self.backend.wait().await
  }

  /// Gets a reference to the internal backend.
  #[must_use]
  pub const fn backend(&self) -> &B {
    &self.backend
  }
}

impl<V, B> Clone for CompletionCounter<V, B>
where
  V: CounterValue,
  B: CompletionCounterBackend<V>,
{
  fn clone(&self) -> Self {
    Self { backend: self.backend.clone(), _values: PhantomData }
  }
}

impl<V, B> Default for CompletionCounter<V, B>
where
  V: CounterValue,
  B: CompletionCounterBackend<V>,
{
  fn default() -> Self {
    Self::new()
  }
}
