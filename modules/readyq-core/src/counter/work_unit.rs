use alloc::boxed::Box;
use core::fmt;

use super::completion_handle::CompletionHandle;

/// Caller-supplied unit of asynchronous work registered against a counter.
///
/// The backend schedules the work on a later scheduler turn and hands it a
/// one-shot [`CompletionHandle`]; the work signals the counter through that
/// handle when it finishes.
pub struct WorkUnit<V>(Box<dyn FnOnce(CompletionHandle<V>) + Send + 'static>);

impl<V> WorkUnit<V> {
  /// Wraps a closure as a work unit.
  #[must_use]
  pub fn new(f: impl FnOnce(CompletionHandle<V>) + Send + 'static) -> Self {
    Self(Box::new(f))
  }

  /// Runs the work unit with its completion handle.
  pub fn run(self, handle: CompletionHandle<V>) {
    (self.0)(handle);
  }
}

impl<V> fmt::Debug for WorkUnit<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("WorkUnit")
  }
}
