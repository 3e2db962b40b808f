//! Data-transfer models for the backend's JSON payloads.
//!
//! The backend speaks camelCase JSON; every type here is a read model
//! of something the backend owns. Nothing in this module performs I/O.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderLine, SalesRow};
pub use product::{Product, ProductPage, encode_image_data};
pub use user::{LoginProbe, User};
