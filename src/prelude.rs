//! Derive macros shared across the calendar modules.

pub use derive_more::Display;
