//! minic-util - Shared infrastructure for the Mini compiler.
//!
//! This crate provides the two pieces every pipeline stage depends on:
//! source coordinates ([`Span`]) and the append-only diagnostics sink
//! ([`Handler`]) that the driver uses to gate stages and produce the
//! error report.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Category, Diagnostic, Handler};
pub use span::Span;
