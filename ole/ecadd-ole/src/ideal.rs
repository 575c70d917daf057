//! Ideal implementations of (random) OLE.
//!
//! The correlated values are passed out-of-band through an in-memory channel.

use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_fields::Field;
use ecadd_ole_core::{
    ideal::{OLEFunctionality, ROLEFunctionality},
    OLECoreError,
};
use ecadd_ot::OTError;
use futures::{channel::mpsc, StreamExt};

use crate::{OLEError, OLEEvaluate, OLEProvide, RandomOLEEvaluate, RandomOLEProvide};

/// Returns an ideal OLE pair.
pub fn ideal_ole_pair<F: Field>() -> (IdealOLEProvider<F>, IdealOLEEvaluator<F>) {
    let (sender, receiver) = mpsc::channel(10);

    (
        IdealOLEProvider {
            functionality: OLEFunctionality::default(),
            channel: sender,
        },
        IdealOLEEvaluator {
            functionality: OLEFunctionality::default(),
            channel: receiver,
        },
    )
}

/// An ideal OLE provider.
#[derive(Debug)]
pub struct IdealOLEProvider<F> {
    functionality: OLEFunctionality<F>,
    channel: mpsc::Sender<(Vec<F>, Vec<F>)>,
}

/// An ideal OLE evaluator.
#[derive(Debug)]
pub struct IdealOLEEvaluator<F> {
    functionality: OLEFunctionality<F>,
    channel: mpsc::Receiver<(Vec<F>, Vec<F>)>,
}

#[async_trait]
impl<Ctx: Context, F: Field> OLEProvide<Ctx, F> for IdealOLEProvider<F> {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OLEError> {
        Ok(())
    }

    async fn provide(&mut self, _ctx: &mut Ctx, factors: Vec<F>) -> Result<Vec<F>, OLEError> {
        let offsets = self.functionality.offsets(factors.len());

        self.channel
            .try_send((factors, offsets.clone()))
            .map_err(|err| OTError::SenderError(Box::new(err.into_send_error())))?;

        Ok(offsets.into_iter().map(|x| -x).collect())
    }
}

#[async_trait]
impl<Ctx: Context, F: Field> OLEEvaluate<Ctx, F> for IdealOLEEvaluator<F> {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OLEError> {
        Ok(())
    }

    async fn evaluate(&mut self, _ctx: &mut Ctx, inputs: Vec<F>) -> Result<Vec<F>, OLEError> {
        let (factors, offsets) = self
            .channel
            .next()
            .await
            .ok_or_else(|| OTError::ReceiverError("ideal OLE provider was dropped".into()))?;

        Ok(self.functionality.evaluate(&factors, &offsets, &inputs)?)
    }
}

/// Returns an ideal ROLE pair.
pub fn ideal_role_pair<F: Field>() -> (IdealROLEProvider<F>, IdealROLEEvaluator<F>) {
    let (sender, receiver) = mpsc::channel(10);

    (
        IdealROLEProvider {
            functionality: ROLEFunctionality::default(),
            channel: sender,
        },
        IdealROLEEvaluator { channel: receiver },
    )
}

/// An ideal ROLE provider.
#[derive(Debug)]
pub struct IdealROLEProvider<F> {
    functionality: ROLEFunctionality<F>,
    channel: mpsc::Sender<(Vec<F>, Vec<F>)>,
}

/// An ideal ROLE evaluator.
#[derive(Debug)]
pub struct IdealROLEEvaluator<F> {
    channel: mpsc::Receiver<(Vec<F>, Vec<F>)>,
}

#[async_trait]
impl<Ctx: Context, F: Field> RandomOLEProvide<Ctx, F> for IdealROLEProvider<F> {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OLEError> {
        Ok(())
    }

    async fn provide_random(
        &mut self,
        _ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError> {
        let (provider, evaluator) = self.functionality.generate(count);

        self.channel
            .try_send(evaluator)
            .map_err(|err| OTError::SenderError(Box::new(err.into_send_error())))?;

        Ok(provider)
    }
}

#[async_trait]
impl<Ctx: Context, F: Field> RandomOLEEvaluate<Ctx, F> for IdealROLEEvaluator<F> {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), OLEError> {
        Ok(())
    }

    async fn evaluate_random(
        &mut self,
        _ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError> {
        let (bk, yk) = self
            .channel
            .next()
            .await
            .ok_or_else(|| OTError::ReceiverError("ideal ROLE provider was dropped".into()))?;

        if bk.len() != count {
            return Err(OLECoreError::LengthMismatch(format!(
                "Requested {} random OLEs, but provider generated {}.",
                count,
                bk.len(),
            ))
            .into());
        }

        Ok((bk, yk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecadd_common::executor::test_st_executor;
    use ecadd_core::{prg::Prg, Block};
    use ecadd_fields::{p256::P256, UniformRand};
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_ideal_ole() {
        let count = 12;
        let mut rng = Prg::from_seed(Block::ZERO);
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);

        let inputs: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();
        let factors: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();

        let (mut provider, mut evaluator) = ideal_ole_pair::<P256>();

        let xk = provider
            .provide(&mut ctx_provider, factors.clone())
            .await
            .unwrap();
        let yk = evaluator
            .evaluate(&mut ctx_evaluator, inputs.clone())
            .await
            .unwrap();

        inputs
            .iter()
            .zip(factors)
            .zip(xk.iter().zip(yk))
            .for_each(|((&b, a), (&x, y))| assert_eq!(x + y, a * b));
    }

    #[tokio::test]
    async fn test_ideal_ole_count_mismatch() {
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);
        let (mut provider, mut evaluator) = ideal_ole_pair::<P256>();

        provider
            .provide(&mut ctx_provider, vec![P256::one(); 2])
            .await
            .unwrap();
        let err = evaluator
            .evaluate(&mut ctx_evaluator, vec![P256::one(); 3])
            .await
            .unwrap_err();

        assert!(matches!(err, OLEError::Core(_)));
    }
}
