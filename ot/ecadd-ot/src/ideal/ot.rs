//! Ideal functionality for oblivious transfer.

use crate::{OTError, OTReceiver, OTSender, OTSetup};
use async_trait::async_trait;
use ecadd_common::Context;
use futures::{channel::mpsc, StreamExt};

/// Ideal OT sender.
#[derive(Debug)]
pub struct IdealOTSender<T> {
    sender: mpsc::Sender<Vec<[T; 2]>>,
}

/// Ideal OT receiver.
#[derive(Debug)]
pub struct IdealOTReceiver<T> {
    receiver: mpsc::Receiver<Vec<[T; 2]>>,
}

/// Creates a pair of ideal OT sender and receiver.
pub fn ideal_ot_pair<T: Send + Sync + 'static>() -> (IdealOTSender<T>, IdealOTReceiver<T>) {
    let (sender, receiver) = mpsc::channel(10);

    (IdealOTSender { sender }, IdealOTReceiver { receiver })
}

#[async_trait]
impl<Ctx, T> OTSetup<Ctx> for IdealOTSender<T>
where
    Ctx: Context,
    T: Send + Sync,
{
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OTError> {
        Ok(())
    }
}

#[async_trait]
impl<Ctx, T> OTSender<Ctx, [T; 2]> for IdealOTSender<T>
where
    Ctx: Context,
    T: Send + Sync + Clone + 'static,
{
    async fn send(&mut self, _ctx: &mut Ctx, msgs: &[[T; 2]]) -> Result<(), OTError> {
        self.sender
            .try_send(msgs.to_vec())
            .map_err(|err| OTError::SenderError(Box::new(err.into_send_error())))
    }
}

#[async_trait]
impl<Ctx, T> OTSetup<Ctx> for IdealOTReceiver<T>
where
    Ctx: Context,
    T: Send + Sync,
{
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OTError> {
        Ok(())
    }
}

#[async_trait]
impl<Ctx, T> OTReceiver<Ctx, bool, T> for IdealOTReceiver<T>
where
    Ctx: Context,
    T: Send + Sync + 'static,
{
    async fn receive(&mut self, _ctx: &mut Ctx, choices: &[bool]) -> Result<Vec<T>, OTError> {
        let payload = self
            .receiver
            .next()
            .await
            .ok_or_else(|| OTError::ReceiverError("ideal OT sender was dropped".into()))?;

        if payload.len() != choices.len() {
            return Err(OTError::CountMismatch {
                expected: choices.len(),
                actual: payload.len(),
            });
        }

        Ok(payload
            .into_iter()
            .zip(choices)
            .map(|([zero, one], &c)| if c { one } else { zero })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecadd_common::executor::test_st_executor;
    use ecadd_core::Block;

    #[tokio::test]
    async fn test_ideal_ot() {
        let (mut ctx_sender, mut ctx_receiver) = test_st_executor(8);
        let (mut sender, mut receiver) = ideal_ot_pair::<Block>();

        let msgs: Vec<[Block; 2]> = (0..8u64)
            .map(|i| [Block::from_counter(2 * i), Block::from_counter(2 * i + 1)])
            .collect();
        let choices: Vec<bool> = (0..8).map(|i| i % 3 == 0).collect();

        sender.send(&mut ctx_sender, &msgs).await.unwrap();
        let received = receiver.receive(&mut ctx_receiver, &choices).await.unwrap();

        let expected: Vec<Block> = msgs
            .iter()
            .zip(&choices)
            .map(|(m, &c)| m[c as usize])
            .collect();

        assert_eq!(received, expected);
    }

    #[tokio::test]
    async fn test_ideal_ot_count_mismatch() {
        let (mut ctx_sender, mut ctx_receiver) = test_st_executor(8);
        let (mut sender, mut receiver) = ideal_ot_pair::<Block>();

        sender
            .send(&mut ctx_sender, &[[Block::ZERO, Block::ONES]; 3])
            .await
            .unwrap();
        let err = receiver
            .receive(&mut ctx_receiver, &[true; 4])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OTError::CountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }
}
