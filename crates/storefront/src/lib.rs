//! Maple Market Storefront - client library for the Maple Market backend.
//!
//! This crate is purely a presentation and state-synchronization layer over
//! an external e-commerce backend reached over HTTP with cookie-based
//! sessions. All business logic - pricing, inventory, authentication,
//! authorization, persistence - lives on the backend; this client browses
//! the catalog, holds an in-memory cart, submits checkouts, and reflects
//! backend results for display.
//!
//! # Architecture
//!
//! - [`api`] - one function per backend endpoint over a uniform
//!   `{status, message, data}` envelope; no retries, no caching
//! - [`session`] - the client's belief about who is signed in, refreshed
//!   once at startup and replaced wholesale by login/logout
//! - [`cart`] - an ordered in-memory list of (product, quantity) lines
//! - [`pages`] - per-view workflows, each an explicit
//!   idle/loading/ready/failed state machine
//! - [`router`] / [`app`] - path-to-page mapping and the composition root
//!   that owns `Session` and `Cart`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod cart;
pub mod config;
pub mod models;
pub mod pages;
pub mod router;
pub mod session;

pub use app::App;
pub use config::StorefrontConfig;
