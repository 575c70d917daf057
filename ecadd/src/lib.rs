//! Two-party secure addition of elliptic curve points.
//!
//! Each participant holds a private point on P-256. The participants jointly compute the affine
//! sum of both points on additive shares of the base field, and finish with an additive sharing
//! of the result modulo `2^256`. Security holds against semi-honest participants.
//!
//! The computation consumes Beaver triples, which are generated ahead of the online phase by a
//! [`TripleSource`](triple::TripleSource) and consumed in order from a
//! [`TriplePool`](pool::TriplePool).

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod circuit;
mod config;
mod error;
pub mod point;
pub mod pool;
pub mod session;
pub mod share;
pub mod triple;

pub use config::{InversionMethod, SessionConfig, SessionConfigBuilder, SessionConfigBuilderError};
pub use ecadd_common::Role;
pub use error::{ArithError, SessionError, TripleError};
pub use point::{Point, SharedPoint};
pub use session::{OutputShares, Session};
pub use share::Share;
