//! Core types and utilities shared by the point-addition engine.
#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod aes;
pub mod block;
pub mod prg;

pub use block::{Block, Label};
