use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::fmt;

/// Immutable snapshot of the collected values handed to every subscriber.
///
/// The same snapshot is shared by all "ready" listeners and by `wait()`ers;
/// it is frozen at termination and never mutated afterwards.
pub type ReadyResults<V> = Arc<Vec<V>>;

/// Subscriber invoked exactly once when a completion counter terminates.
pub struct ReadyListener<V>(Box<dyn FnOnce(ReadyResults<V>) + Send + 'static>);

impl<V> ReadyListener<V> {
  /// Wraps a closure as a ready listener.
  #[must_use]
  pub fn new(f: impl FnOnce(ReadyResults<V>) + Send + 'static) -> Self {
    Self(Box::new(f))
  }

  /// Invokes the listener with the terminal results snapshot.
  pub fn invoke(self, results: ReadyResults<V>) {
    (self.0)(results);
  }
}

impl<V> fmt::Debug for ReadyListener<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ReadyListener")
  }
}
