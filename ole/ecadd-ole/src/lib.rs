//! Async implementations of the OT-multiplication primitive.
//!
//! Every backend implements the same interface: the provider holds factors `a_k`, the evaluator
//! holds inputs `b_k`, and afterwards the provider's and the evaluator's outputs are additive
//! shares of `a_k * b_k`.
//!
//! * [`ot`]: the bit-serial protocol over a 1-out-of-2 OT.
//! * [`rot`] and [`ole`]: the batched protocol, random OLE from random OT, derandomized.
//! * [`ideal`]: ideal implementations for testing.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

#[cfg(feature = "ideal")]
pub mod ideal;
pub mod msg;
pub mod ole;
pub mod ot;
pub mod rot;

use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_fields::Field;
use ecadd_ole_core::OLECoreError;
use ecadd_ot::OTError;

/// An OLE error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum OLEError {
    #[error(transparent)]
    OT(#[from] OTError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] OLECoreError),
}

/// An OLE provider.
///
/// The provider holds the factors of the products.
#[async_trait]
pub trait OLEProvide<Ctx: Context, F: Field>: Send {
    /// Runs the one-time setup of the underlying OT.
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError>;

    /// Provides the factors and returns the provider's shares of the products.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `factors` - The provider's factors.
    async fn provide(&mut self, ctx: &mut Ctx, factors: Vec<F>) -> Result<Vec<F>, OLEError>;
}

/// An OLE evaluator.
///
/// The evaluator holds the inputs of the products.
#[async_trait]
pub trait OLEEvaluate<Ctx: Context, F: Field>: Send {
    /// Runs the one-time setup of the underlying OT.
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError>;

    /// Evaluates the products at the inputs and returns the evaluator's shares.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `inputs` - The evaluator's inputs.
    async fn evaluate(&mut self, ctx: &mut Ctx, inputs: Vec<F>) -> Result<Vec<F>, OLEError>;

    /// Evaluates the products at inputs given by bit encodings.
    ///
    /// Every input is given by `F::BIT_SIZE` bits, least significant bit first, encoding
    /// `sum(b_k * 2^k) mod p`. Encodings do not need to be canonical.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `bits` - The concatenated bit encodings.
    async fn evaluate_bits(&mut self, ctx: &mut Ctx, bits: Vec<bool>) -> Result<Vec<F>, OLEError> {
        let inputs = decode_bits(&bits)?;
        self.evaluate(ctx, inputs).await
    }
}

/// A random OLE provider.
#[async_trait]
pub trait RandomOLEProvide<Ctx: Context, F: Field>: Send {
    /// Runs the one-time setup of the underlying random OT.
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError>;

    /// Returns random factors `ak` and offsets `xk`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of random OLEs.
    async fn provide_random(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError>;
}

/// A random OLE evaluator.
#[async_trait]
pub trait RandomOLEEvaluate<Ctx: Context, F: Field>: Send {
    /// Runs the one-time setup of the underlying random OT.
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError>;

    /// Returns random inputs `bk` and outputs `yk = ak * bk + xk`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of random OLEs.
    async fn evaluate_random(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError>;
}

/// Decodes bit encodings into field elements, reducing modulo the field order.
fn decode_bits<F: Field>(bits: &[bool]) -> Result<Vec<F>, OLEError> {
    let size = F::BIT_SIZE as usize;

    if bits.len() % size != 0 {
        return Err(OLECoreError::LengthMismatch(format!(
            "Number of input bits {} is not a multiple of {}.",
            bits.len(),
            size,
        ))
        .into());
    }

    Ok(bits
        .chunks_exact(size)
        .map(|chunk| F::from_lsb0_iter(chunk.iter().copied()))
        .collect())
}
