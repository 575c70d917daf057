//! OLE from random OLE.
//!
//! The provider returns the negation of its OLE offsets, so that the outputs of both parties are
//! additive shares of the products.

use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_fields::Field;
use ecadd_ole_core::ole::{OLEeEvaluator, OLEeProvider};
use serio::{stream::IoStreamExt, SinkExt};

use crate::{
    msg::OLEMessage, OLEError, OLEEvaluate, OLEProvide, RandomOLEEvaluate, RandomOLEProvide,
};

/// A provider for OLE.
#[derive(Debug)]
pub struct OLEProvider<T, F> {
    role_provider: T,
    core: OLEeProvider<F>,
}

impl<T, F: Field> OLEProvider<T, F> {
    /// Creates a new [`OLEProvider`].
    pub fn new(role_provider: T) -> Self {
        Self {
            role_provider,
            core: OLEeProvider::default(),
        }
    }

    /// Returns a mutable reference to the random OLE provider.
    pub fn role_mut(&mut self) -> &mut T {
        &mut self.role_provider
    }
}

#[async_trait]
impl<Ctx, T, F> OLEProvide<Ctx, F> for OLEProvider<T, F>
where
    Ctx: Context,
    T: RandomOLEProvide<Ctx, F>,
    F: Field,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError> {
        self.role_provider.setup(ctx).await
    }

    async fn provide(&mut self, ctx: &mut Ctx, factors: Vec<F>) -> Result<Vec<F>, OLEError> {
        let (ak_dash, xk_dash) = self
            .role_provider
            .provide_random(ctx, factors.len())
            .await?;

        let uk = self.core.create_mask(&ak_dash, &factors)?;

        let io = ctx.io_mut();
        io.send(OLEMessage::ProviderDerand(uk)).await?;
        let vk = io
            .expect_next::<OLEMessage<F>>()
            .await?
            .try_into_evaluator_derand()?;

        let xk = self.core.generate_output(&ak_dash, &xk_dash, &vk)?;

        Ok(xk.into_iter().map(|x| -x).collect())
    }
}

/// An evaluator for OLE.
#[derive(Debug)]
pub struct OLEEvaluator<T, F> {
    role_evaluator: T,
    core: OLEeEvaluator<F>,
}

impl<T, F: Field> OLEEvaluator<T, F> {
    /// Creates a new [`OLEEvaluator`].
    pub fn new(role_evaluator: T) -> Self {
        Self {
            role_evaluator,
            core: OLEeEvaluator::default(),
        }
    }

    /// Returns a mutable reference to the random OLE evaluator.
    pub fn role_mut(&mut self) -> &mut T {
        &mut self.role_evaluator
    }
}

#[async_trait]
impl<Ctx, T, F> OLEEvaluate<Ctx, F> for OLEEvaluator<T, F>
where
    Ctx: Context,
    T: RandomOLEEvaluate<Ctx, F>,
    F: Field,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError> {
        self.role_evaluator.setup(ctx).await
    }

    async fn evaluate(&mut self, ctx: &mut Ctx, inputs: Vec<F>) -> Result<Vec<F>, OLEError> {
        let (bk_dash, yk_dash) = self
            .role_evaluator
            .evaluate_random(ctx, inputs.len())
            .await?;

        let vk = self.core.create_mask(&bk_dash, &inputs)?;

        let io = ctx.io_mut();
        let uk = io
            .expect_next::<OLEMessage<F>>()
            .await?
            .try_into_provider_derand()?;
        io.send(OLEMessage::EvaluatorDerand(vk)).await?;

        Ok(self.core.generate_output(&inputs, &yk_dash, &uk)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ideal::ideal_role_pair,
        rot::{ROLEEvaluator, ROLEProvider},
    };
    use ecadd_common::executor::test_st_executor;
    use ecadd_core::{prg::Prg, Block};
    use ecadd_fields::{p256::P256, UniformRand, U256};
    use ecadd_ot::ideal::ideal_random_ot_pair;
    use itybity::IntoBitIterator;
    use rand::SeedableRng;
    use rstest::rstest;

    fn assert_products(ak: &[P256], bk: &[P256], xk: &[P256], yk: &[P256]) {
        ak.iter()
            .zip(bk)
            .zip(xk.iter().zip(yk))
            .for_each(|((&a, &b), (&x, &y))| assert_eq!(x + y, a * b));
    }

    #[tokio::test]
    async fn test_ole_over_ideal_role() {
        let count = 12;
        let mut rng = Prg::from_seed(Block::ZERO);
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);

        let (role_provider, role_evaluator) = ideal_role_pair::<P256>();
        let mut provider = OLEProvider::<_, P256>::new(role_provider);
        let mut evaluator = OLEEvaluator::<_, P256>::new(role_evaluator);

        let ak: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();
        let bk: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();

        let (xk, yk) = tokio::try_join!(
            provider.provide(&mut ctx_provider, ak.clone()),
            evaluator.evaluate(&mut ctx_evaluator, bk.clone())
        )
        .unwrap();

        assert_products(&ak, &bk, &xk, &yk);
    }

    #[tokio::test]
    async fn test_ole_over_rot() {
        let count = 2;
        let mut rng = Prg::from_seed(Block::ONES);
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);

        let (rot_sender, rot_receiver) = ideal_random_ot_pair([3; 32]);
        let mut provider: OLEProvider<_, P256> =
            OLEProvider::new(ROLEProvider::<_, P256>::new(rot_sender));
        let mut evaluator: OLEEvaluator<_, P256> =
            OLEEvaluator::new(ROLEEvaluator::<_, P256>::new(rot_receiver));

        tokio::try_join!(
            provider.role_mut().preprocess(&mut ctx_provider, count),
            evaluator.role_mut().preprocess(&mut ctx_evaluator, count)
        )
        .unwrap();

        let ak: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();
        let bk: Vec<P256> = (0..count).map(|_| P256::rand(&mut rng)).collect();

        let (xk, yk) = tokio::try_join!(
            provider.provide(&mut ctx_provider, ak.clone()),
            evaluator.evaluate(&mut ctx_evaluator, bk.clone())
        )
        .unwrap();

        assert_products(&ak, &bk, &xk, &yk);
        assert_eq!(provider.role_mut().available(), 0);
    }

    fn bits_of(value: U256) -> Vec<bool> {
        value.into_iter_lsb0().collect()
    }

    #[rstest]
    #[case::canonical(bits_of(U256::from(6u64)), P256::from(6u64))]
    #[case::non_canonical(
        bits_of(P256::MODULUS.wrapping_add(&U256::from(4u64))),
        P256::from(4u64)
    )]
    #[case::all_ones(vec![true; 256], P256::from_be_bytes_mod_order(&[0xff; 32]))]
    #[tokio::test]
    async fn test_ole_evaluate_bits(#[case] bits: Vec<bool>, #[case] input: P256) {
        let (mut ctx_provider, mut ctx_evaluator) = test_st_executor(8);

        let (role_provider, role_evaluator) = ideal_role_pair::<P256>();
        let mut provider = OLEProvider::<_, P256>::new(role_provider);
        let mut evaluator = OLEEvaluator::<_, P256>::new(role_evaluator);

        let factor = P256::from(13u64);

        let (xk, yk) = tokio::try_join!(
            provider.provide(&mut ctx_provider, vec![factor]),
            evaluator.evaluate_bits(&mut ctx_evaluator, bits)
        )
        .unwrap();

        assert_products(&[factor], &[input], &xk, &yk);
    }

    #[tokio::test]
    async fn test_ole_evaluate_bits_partial_encoding() {
        let (mut ctx, _) = test_st_executor(8);
        let (_, role_evaluator) = ideal_role_pair::<P256>();
        let mut evaluator = OLEEvaluator::<_, P256>::new(role_evaluator);

        let err = evaluator
            .evaluate_bits(&mut ctx, vec![true; 255])
            .await
            .unwrap_err();

        assert!(matches!(err, OLEError::Core(_)));
    }
}
