//! Common functionality for the point-addition engine.
//!
//! This crate provides the functionality needed for modeling protocol execution and I/O between
//! the two participants.
//!
//! This crate does not provide any cryptographic primitives, see `ecadd-core` for that.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

mod context;
pub mod executor;
mod role;

pub use context::Context;
pub use role::{exchange, Role};
