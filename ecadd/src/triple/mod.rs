//! Beaver triples and their generation.
//!
//! A triple is a sharing of `(a, b, c)` with `a * b = c`. Triples come from a [`TripleSource`]:
//!
//! * [`OLETripleSource`]: the participants generate triples obliviously, with two runs of the
//!   OT-multiplication covering the cross terms `a_0 * b_1` and `a_1 * b_0`.
//! * `DealerTripleSource`: the initiator samples the triples and deals them. Only available with
//!   the `dealer` feature, as the initiator learns all triples.

#[cfg(any(test, feature = "dealer"))]
mod dealer;
mod ole;

#[cfg(any(test, feature = "dealer"))]
pub use dealer::DealerTripleSource;
pub use ole::OLETripleSource;

use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_fields::Field;

use crate::{Share, TripleError};

/// One participant's shares of a Beaver triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple<F> {
    /// Share of `a`.
    pub a: Share<F>,
    /// Share of `b`.
    pub b: Share<F>,
    /// Share of `c = a * b`.
    pub c: Share<F>,
}

/// A source of Beaver triples.
#[async_trait]
pub trait TripleSource<Ctx: Context, F: Field>: Send {
    /// Runs the one-time setup of the source.
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), TripleError>;

    /// Generates `count` triples.
    async fn generate(&mut self, ctx: &mut Ctx, count: usize)
        -> Result<Vec<Triple<F>>, TripleError>;
}
