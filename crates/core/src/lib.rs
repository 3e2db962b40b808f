//! Maple Market Core - Shared domain types.
//!
//! This crate provides the common types used by the storefront client:
//! newtype ids, prices, and role markers. It contains only types and
//! their invariants - no I/O, no HTTP, no persistence. Everything the
//! backend owns (pricing rules, inventory, authorization) stays on the
//! backend; these types are the client's read model of it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
