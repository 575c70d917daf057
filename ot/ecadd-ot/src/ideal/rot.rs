//! Ideal functionality for random oblivious transfer.

use crate::{OTError, OTSetup, RandomOTReceiver, RandomOTSender};
use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_core::Block;
use futures::{channel::mpsc, StreamExt};
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use rand_core::SeedableRng;

/// Ideal random OT sender.
#[derive(Debug)]
pub struct IdealRandomOTSender {
    sender: mpsc::Sender<Vec<[Block; 2]>>,
    rng: ChaCha12Rng,
}

/// Ideal random OT receiver.
#[derive(Debug)]
pub struct IdealRandomOTReceiver {
    receiver: mpsc::Receiver<Vec<[Block; 2]>>,
    rng: ChaCha12Rng,
}

/// Creates a pair of ideal random OT sender and receiver.
///
/// The sender expands its wire pairs from `seed`; the receiver draws its choice bits from a
/// generator seeded the same way, which is fine for an ideal functionality.
pub fn ideal_random_ot_pair(seed: [u8; 32]) -> (IdealRandomOTSender, IdealRandomOTReceiver) {
    let (sender, receiver) = mpsc::channel(10);

    (
        IdealRandomOTSender {
            sender,
            rng: ChaCha12Rng::from_seed(seed),
        },
        IdealRandomOTReceiver {
            receiver,
            rng: ChaCha12Rng::from_seed(seed),
        },
    )
}

#[async_trait]
impl<Ctx: Context> OTSetup<Ctx> for IdealRandomOTSender {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OTError> {
        Ok(())
    }
}

#[async_trait]
impl<Ctx: Context> RandomOTSender<Ctx, [Block; 2]> for IdealRandomOTSender {
    async fn send_random(
        &mut self,
        _ctx: &mut Ctx,
        count: usize,
    ) -> Result<Vec<[Block; 2]>, OTError> {
        let messages = (0..count)
            .map(|_| [Block::random(&mut self.rng), Block::random(&mut self.rng)])
            .collect::<Vec<_>>();

        self.sender
            .try_send(messages.clone())
            .map_err(|err| OTError::SenderError(Box::new(err.into_send_error())))?;

        Ok(messages)
    }
}

#[async_trait]
impl<Ctx: Context> OTSetup<Ctx> for IdealRandomOTReceiver {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OTError> {
        Ok(())
    }
}

#[async_trait]
impl<Ctx: Context> RandomOTReceiver<Ctx, bool, Block> for IdealRandomOTReceiver {
    async fn receive_random(
        &mut self,
        _ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<bool>, Vec<Block>), OTError> {
        let payload = self
            .receiver
            .next()
            .await
            .ok_or_else(|| OTError::ReceiverError("ideal random OT sender was dropped".into()))?;

        if payload.len() != count {
            return Err(OTError::CountMismatch {
                expected: count,
                actual: payload.len(),
            });
        }

        let choices = (0..count).map(|_| self.rng.gen()).collect::<Vec<bool>>();
        let payload = payload
            .into_iter()
            .zip(&choices)
            .map(|([zero, one], &c)| if c { one } else { zero })
            .collect();

        Ok((choices, payload))
    }
}
