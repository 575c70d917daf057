//! Interfaces of the oblivious transfer services used by the engine.
//!
//! The base 1-out-of-2 OT and the OT extension which expands random wire pairs are external
//! collaborators. This crate fixes their interfaces and provides ideal implementations for
//! testing.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

#[cfg(feature = "ideal")]
pub mod ideal;

use async_trait::async_trait;
use ecadd_common::Context;

/// An oblivious transfer error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum OTError {
    #[error("sender error: {0}")]
    SenderError(Box<dyn std::error::Error + Send + Sync>),
    #[error("receiver error: {0}")]
    ReceiverError(Box<dyn std::error::Error + Send + Sync>),
    #[error("expected {expected} OT messages, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// An oblivious transfer protocol that needs to perform a one-time setup.
#[async_trait]
pub trait OTSetup<Ctx: Context> {
    /// Runs any one-time setup for the protocol.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OTError>;
}

/// An oblivious transfer sender.
#[async_trait]
pub trait OTSender<Ctx: Context, T>
where
    T: Send + Sync,
{
    /// Obliviously transfers the messages to the receiver.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `msgs` - The messages to obliviously transfer.
    async fn send(&mut self, ctx: &mut Ctx, msgs: &[T]) -> Result<(), OTError>;
}

/// An oblivious transfer receiver.
#[async_trait]
pub trait OTReceiver<Ctx: Context, T, U>
where
    T: Send + Sync,
    U: Send + Sync,
{
    /// Obliviously receives data from the sender.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `choices` - The choices made by the receiver.
    async fn receive(&mut self, ctx: &mut Ctx, choices: &[T]) -> Result<Vec<U>, OTError>;
}

/// A random OT sender.
///
/// Expands pairs of pseudorandom wire labels, as provided by an OT extension.
#[async_trait]
pub trait RandomOTSender<Ctx: Context, T>
where
    T: Send + Sync,
{
    /// Outputs pairs of random messages.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of pairs of random messages to output.
    async fn send_random(&mut self, ctx: &mut Ctx, count: usize) -> Result<Vec<T>, OTError>;
}

/// A random OT receiver.
#[async_trait]
pub trait RandomOTReceiver<Ctx: Context, T, U>
where
    T: Send + Sync,
    U: Send + Sync,
{
    /// Outputs the choice bits and the corresponding messages.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of random messages to receive.
    async fn receive_random(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<T>, Vec<U>), OTError>;
}
