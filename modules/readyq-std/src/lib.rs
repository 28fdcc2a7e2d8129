#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::redundant_pattern)]
#![deny(clippy::redundant_static_lifetimes)]
#![deny(clippy::unnecessary_to_owned)]
#![deny(clippy::unnecessary_struct_initialization)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_ok_or)]
#![deny(clippy::manual_map)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::manual_strip)]
#![deny(clippy::unused_async)]
#![deny(clippy::unused_self)]
#![deny(clippy::unnecessary_wraps)]
#![deny(clippy::unreachable)]
#![deny(clippy::empty_enum)]
#![deny(clippy::no_effect)]
#![deny(dropping_copy_types)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::missing_const_for_fn)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::wrong_self_convention)]
#![deny(clippy::from_over_into)]
#![deny(clippy::eq_op)]
#![deny(clippy::bool_comparison)]
#![deny(clippy::needless_bool)]
#![deny(clippy::match_like_matches_macro)]
#![deny(clippy::manual_assert)]
#![deny(clippy::if_same_then_else)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]

//! Tokio-backed completion counter for std runtimes.
//!
//! This crate binds the abstractions defined in `readyq_core_rs` to the Tokio
//! runtime: registered work units are scheduled with `tokio::spawn`, the
//! optional deadline is a spawned sleep task aborted on normal termination,
//! and `wait()` is driven by `tokio::sync::Notify`.

/// Completion counter backed by Tokio synchronization types.
pub mod counter;

pub use counter::{CompletionCounter, TokioCompletionCounterBackend};
pub use readyq_core_rs::counter::{
  CompletionCounterBackend, CompletionHandle, CounterValue, ReadyListener, ReadyResults, WorkUnit,
};

/// Prelude module that re-exports commonly used types and traits.
pub mod prelude {
  pub use readyq_core_rs::counter::{
    CompletionCounterBackend, CompletionHandle, CounterValue, ReadyListener, ReadyResults, WorkUnit,
  };

  pub use crate::counter::{CompletionCounter, TokioCompletionCounterBackend};
}
