use alloc::boxed::Box;
use core::time::Duration;

use async_trait::async_trait;

use super::{
  counter_value::CounterValue,
  ready_listener::{ReadyListener, ReadyResults},
  work_unit::WorkUnit,
};

/// Backend trait for completion counter implementations.
#[async_trait(?Send)]
pub trait CompletionCounterBackend<V>: Clone
where
  V: CounterValue, {
  /// Creates a backend with the pending count initialised to 0.
  fn new() -> Self;

  /// Creates a backend with the specified initial pending count.
  fn with_count(count: usize) -> Self;

  /// Creates a backend that additionally terminates once `max_wait` elapses.
  ///
  /// A zero `max_wait` arms no timer.
  fn with_deadline(count: usize, max_wait: Duration) -> Self;

  /// Adds one expected completion. No-op once terminal.
  fn register(&self);

  /// Adds one expected completion and schedules `work` on a later scheduler
  /// turn, handing it a one-shot completion handle.
  fn register_work(&self, work: WorkUnit<V>);

  /// Records one completion, collecting `value` when present. Terminates the
  /// counter once the net pending count reaches zero or below. No-op once
  /// terminal.
  fn complete(&self, value: Option<V>);

  /// Subscribes a listener to the terminal "ready" notification.
  fn subscribe(&self, listener: ReadyListener<V>);

  /// Returns `true` once the counter has terminated.
  fn is_terminal(&self) -> bool;

  /// Waits until the counter terminates and returns the results snapshot.
  async fn wait(&self) -> ReadyResults<V>;
}
