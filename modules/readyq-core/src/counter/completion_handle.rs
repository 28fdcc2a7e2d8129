use alloc::sync::Arc;
use core::{
  fmt,
  sync::atomic::{AtomicBool, Ordering},
};

/// One-shot completion callback handed to registered work units.
///
/// The first invocation forwards the optional value to the owning counter.
/// Repeated invocations are detected, reported as a warning, and otherwise
/// ignored; they never affect the pending count or the collected results.
pub struct CompletionHandle<V> {
  sink:  Arc<dyn Fn(Option<V>) + Send + Sync + 'static>,
  fired: Arc<AtomicBool>,
}

impl<V> CompletionHandle<V> {
  /// Creates a handle that forwards its first completion to `sink`.
  #[must_use]
  pub fn new(sink: impl Fn(Option<V>) + Send + Sync + 'static) -> Self {
    Self { sink: Arc::new(sink), fired: Arc::new(AtomicBool::new(false)) }
  }

  /// Signals that the work unit has completed, optionally carrying a value.
  pub fn complete(&self, value: Option<V>) {
    if self.fired.swap(true, Ordering::SeqCst) {
      tracing::warn!("completion handle invoked more than once; ignoring");
      return;
    }
    (self.sink)(value);
  }

  /// Returns `true` once the handle has been invoked.
  #[must_use]
  pub fn is_fired(&self) -> bool {
    self.fired.load(Ordering::SeqCst)
  }
}

impl<V> Clone for CompletionHandle<V> {
  fn clone(&self) -> Self {
    Self { sink: self.sink.clone(), fired: self.fired.clone() }
  }
}

impl<V> fmt::Debug for CompletionHandle<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompletionHandle").field("fired", &self.is_fired()).finish()
  }
}
