#![no_std]
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

//! Runtime-agnostic completion counter primitives.
//!
//! A completion counter tracks a pending count of outstanding asynchronous
//! operations and fires a single "ready" notification once the net count
//! reaches zero (or once an optional deadline lapses first). This crate
//! defines the backend abstraction and the generic facade; runtime bindings
//! live in companion crates such as `readyq-std-rs`.

extern crate alloc;

#[cfg(test)]
extern crate std;

/// Completion counter primitives.
pub mod counter;

pub use counter::{
  CompletionCounter, CompletionCounterBackend, CompletionHandle, CounterValue, ReadyListener, ReadyResults, WorkUnit,
};

/// Prelude module that re-exports commonly used types and traits.
pub mod prelude {
  pub use crate::counter::{
    CompletionCounter, CompletionCounterBackend, CompletionHandle, CounterValue, ReadyListener, ReadyResults, WorkUnit,
  };
}
