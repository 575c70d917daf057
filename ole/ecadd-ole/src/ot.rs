//! The bit-serial OT-multiplication over a 1-out-of-2 OT.

use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_core::Block;
use ecadd_fields::Field;
use ecadd_ole_core::bits::{OTMulReceiver, OTMulSender};
use ecadd_ot::{OTError, OTReceiver, OTSender, OTSetup};
use tracing::trace;

use crate::{OLEError, OLEEvaluate, OLEProvide};

/// A provider for the bit-serial OT-multiplication, acting as OT sender.
#[derive(Debug)]
pub struct OTProvider<T, F> {
    ot_sender: T,
    core: OTMulSender<F>,
}

impl<T, F: Field> OTProvider<T, F> {
    /// Creates a new [`OTProvider`].
    pub fn new(ot_sender: T) -> Self {
        Self {
            ot_sender,
            core: OTMulSender::default(),
        }
    }
}

#[async_trait]
impl<Ctx, T, F> OLEProvide<Ctx, F> for OTProvider<T, F>
where
    Ctx: Context,
    T: OTSetup<Ctx> + OTSender<Ctx, [Block; 2]> + Send,
    F: Field,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError> {
        self.ot_sender.setup(ctx).await?;
        Ok(())
    }

    async fn provide(&mut self, ctx: &mut Ctx, factors: Vec<F>) -> Result<Vec<F>, OLEError> {
        let masks = self.core.sample_masks(factors.len());
        let pairs = self.core.create_pairs(&factors, &masks)?;

        trace!(count = pairs.len(), "sending OT pairs");
        self.ot_sender.send(ctx, &pairs).await?;

        Ok(self.core.generate_output(&masks)?)
    }
}

/// An evaluator for the bit-serial OT-multiplication, acting as OT receiver.
#[derive(Debug)]
pub struct OTEvaluator<T, F> {
    ot_receiver: T,
    core: OTMulReceiver<F>,
}

impl<T, F: Field> OTEvaluator<T, F> {
    /// Creates a new [`OTEvaluator`].
    pub fn new(ot_receiver: T) -> Self {
        Self {
            ot_receiver,
            core: OTMulReceiver::default(),
        }
    }
}

impl<T, F: Field> OTEvaluator<T, F> {
    async fn receive<Ctx>(&mut self, ctx: &mut Ctx, choices: Vec<bool>) -> Result<Vec<F>, OLEError>
    where
        Ctx: Context,
        T: OTReceiver<Ctx, bool, Block> + Send,
    {
        trace!(count = choices.len(), "receiving OT messages");
        let received = self.ot_receiver.receive(ctx, &choices).await?;

        if received.len() != choices.len() {
            return Err(OTError::CountMismatch {
                expected: choices.len(),
                actual: received.len(),
            }
            .into());
        }

        Ok(self.core.generate_output(&received)?)
    }
}

#[async_trait]
impl<Ctx, T, F> OLEEvaluate<Ctx, F> for OTEvaluator<T, F>
where
    Ctx: Context,
    T: OTSetup<Ctx> + OTReceiver<Ctx, bool, Block> + Send,
    F: Field,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError> {
        self.ot_receiver.setup(ctx).await?;
        Ok(())
    }

    async fn evaluate(&mut self, ctx: &mut Ctx, inputs: Vec<F>) -> Result<Vec<F>, OLEError> {
        let choices = self.core.choices(&inputs);
        self.receive(ctx, choices).await
    }

    async fn evaluate_bits(&mut self, ctx: &mut Ctx, bits: Vec<bool>) -> Result<Vec<F>, OLEError> {
        let choices = self.core.choices_from_bits(&bits)?;
        self.receive(ctx, choices).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecadd_common::executor::test_st_executor;
    use ecadd_core::prg::Prg;
    use ecadd_fields::{p256::P256, UniformRand, U256};
    use ecadd_ot::ideal::ideal_ot_pair;
    use itybity::IntoBitIterator;
    use rand::SeedableRng;
    use rstest::rstest;

    /// Returns one message fewer than requested.
    struct ShortReceiver;

    #[async_trait]
    impl<Ctx: Context> OTSetup<Ctx> for ShortReceiver {
        async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OTError> {
            Ok(())
        }
    }

    #[async_trait]
    impl<Ctx: Context> OTReceiver<Ctx, bool, Block> for ShortReceiver {
        async fn receive(
            &mut self,
            _ctx: &mut Ctx,
            choices: &[bool],
        ) -> Result<Vec<Block>, OTError> {
            Ok(vec![Block::ZERO; choices.len() - 1])
        }
    }

    #[rstest]
    #[case::one(1)]
    #[case::many(3)]
    #[tokio::test]
    async fn test_bit_serial_ole(#[case] count: usize) {
        let mut rng = Prg::from_seed(Block::ZERO);
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);

        let (ot_sender, ot_receiver) = ideal_ot_pair::<Block>();
        let mut provider = OTProvider::<_, P256>::new(ot_sender);
        let mut evaluator = OTEvaluator::<_, P256>::new(ot_receiver);

        let factors: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();
        let inputs: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();

        let (provider_shares, evaluator_shares) = tokio::try_join!(
            provider.provide(&mut ctx_provider, factors.clone()),
            evaluator.evaluate(&mut ctx_evaluator, inputs.clone())
        )
        .unwrap();

        factors
            .iter()
            .zip(&inputs)
            .zip(provider_shares.iter().zip(&evaluator_shares))
            .for_each(|((&a, &b), (&x, &y))| assert_eq!(x + y, a * b));
    }

    #[tokio::test]
    async fn test_bit_serial_ole_non_canonical_bits() {
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);

        let (ot_sender, ot_receiver) = ideal_ot_pair::<Block>();
        let mut provider = OTProvider::<_, P256>::new(ot_sender);
        let mut evaluator = OTEvaluator::<_, P256>::new(ot_receiver);

        let factor = P256::from(11u64);
        // p + 2 encodes 2
        let bits: Vec<bool> = P256::MODULUS
            .wrapping_add(&U256::from(2u64))
            .into_iter_lsb0()
            .collect();

        let (provider_shares, evaluator_shares) = tokio::try_join!(
            provider.provide(&mut ctx_provider, vec![factor]),
            evaluator.evaluate_bits(&mut ctx_evaluator, bits)
        )
        .unwrap();

        assert_eq!(
            provider_shares[0] + evaluator_shares[0],
            P256::from(22u64)
        );
    }

    #[tokio::test]
    async fn test_bit_serial_ole_short_batch() {
        let (mut ctx, _) = test_st_executor(8);
        let mut evaluator = OTEvaluator::<_, P256>::new(ShortReceiver);

        let err = evaluator
            .evaluate(&mut ctx, vec![P256::from(3u64)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OLEError::OT(OTError::CountMismatch {
                expected: 512,
                actual: 511
            })
        ));
    }
}
