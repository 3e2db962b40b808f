//! Core types for Maple Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod role;

pub use id::*;
pub use price::{Price, PriceError};
pub use role::{Role, RoleSet};
