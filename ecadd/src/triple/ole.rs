use async_trait::async_trait;
use ecadd_common::{Context, Role};
use ecadd_fields::Field;
use ecadd_ole::{OLEEvaluate, OLEProvide};
use rand::thread_rng;
use tracing::{debug, instrument};

use crate::{
    triple::{Triple, TripleSource},
    Share, TripleError,
};

/// Generates triples obliviously from OT-multiplication.
///
/// Each participant samples its shares `a_i` and `b_i` locally. The provider multiplies the own
/// `a_i` with the peer's `b_j`, the evaluator the peer's `a_j` with the own `b_i`, so
/// `c_i = a_i * b_i + provided_i + evaluated_i` sums to `(a_0 + a_1) * (b_0 + b_1)`.
///
/// The provider of one participant must be paired with the evaluator of the other. The initiator
/// provides first, the responder evaluates first.
#[derive(Debug)]
pub struct OLETripleSource<P, E> {
    role: Role,
    provider: P,
    evaluator: E,
}

impl<P, E> OLETripleSource<P, E> {
    /// Creates a new [`OLETripleSource`].
    ///
    /// # Arguments
    ///
    /// * `role` - The protocol role.
    /// * `provider` - The OLE provider, paired with the peer's evaluator.
    /// * `evaluator` - The OLE evaluator, paired with the peer's provider.
    pub fn new(role: Role, provider: P, evaluator: E) -> Self {
        Self {
            role,
            provider,
            evaluator,
        }
    }
}

#[async_trait]
impl<Ctx, F, P, E> TripleSource<Ctx, F> for OLETripleSource<P, E>
where
    Ctx: Context,
    F: Field,
    P: OLEProvide<Ctx, F>,
    E: OLEEvaluate<Ctx, F>,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), TripleError> {
        match self.role {
            Role::Initiator => {
                self.provider.setup(ctx).await?;
                self.evaluator.setup(ctx).await?;
            }
            Role::Responder => {
                self.evaluator.setup(ctx).await?;
                self.provider.setup(ctx).await?;
            }
        }

        Ok(())
    }

    #[instrument(level = "debug", skip_all, err)]
    async fn generate(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<Vec<Triple<F>>, TripleError> {
        let (a, b): (Vec<F>, Vec<F>) = {
            let mut rng = thread_rng();
            (0..count)
                .map(|_| (F::rand(&mut rng), F::rand(&mut rng)))
                .unzip()
        };

        let (provided, evaluated) = match self.role {
            Role::Initiator => {
                let provided = self.provider.provide(ctx, a.clone()).await?;
                let evaluated = self.evaluator.evaluate(ctx, b.clone()).await?;
                (provided, evaluated)
            }
            Role::Responder => {
                let evaluated = self.evaluator.evaluate(ctx, b.clone()).await?;
                let provided = self.provider.provide(ctx, a.clone()).await?;
                (provided, evaluated)
            }
        };

        for len in [provided.len(), evaluated.len()] {
            if len != count {
                return Err(TripleError::LengthMismatch {
                    expected: count,
                    actual: len,
                });
            }
        }

        let triples: Vec<Triple<F>> = a
            .into_iter()
            .zip(b)
            .zip(provided.into_iter().zip(evaluated))
            .map(|((a, b), (x, y))| Triple {
                a: Share::new(a),
                b: Share::new(b),
                c: Share::new(a * b + x + y),
            })
            .collect();

        debug!(count, "generated triples");

        Ok(triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triple::test_utils::assert_triples;
    use ecadd_common::executor::test_st_executor;
    use ecadd_core::Block;
    use ecadd_fields::p256::P256;
    use ecadd_ole::{
        ideal::ideal_ole_pair,
        ole::{OLEEvaluator, OLEProvider},
        ot::{OTEvaluator, OTProvider},
        rot::{ROLEEvaluator, ROLEProvider},
    };
    use ecadd_ot::ideal::{ideal_ot_pair, ideal_random_ot_pair};
    use rstest::rstest;

    #[rstest]
    #[case::one(1)]
    #[case::many(20)]
    #[tokio::test]
    async fn test_ole_triples_ideal(#[case] count: usize) {
        let (mut ctx_0, mut ctx_1) = test_st_executor(8);
        let (provider_0, evaluator_1) = ideal_ole_pair::<P256>();
        let (provider_1, evaluator_0) = ideal_ole_pair::<P256>();

        let mut source_0 = OLETripleSource::new(Role::Initiator, provider_0, evaluator_0);
        let mut source_1 = OLETripleSource::new(Role::Responder, provider_1, evaluator_1);

        let (triples_0, triples_1) = tokio::try_join!(
            source_0.generate(&mut ctx_0, count),
            source_1.generate(&mut ctx_1, count)
        )
        .unwrap();

        assert_eq!(triples_0.len(), count);
        assert_triples(&mut ctx_0, &mut ctx_1, &triples_0, &triples_1).await;
    }

    #[tokio::test]
    async fn test_ole_triples_bit_serial() {
        let (mut ctx_0, mut ctx_1) = test_st_executor(8);
        let (ot_sender_0, ot_receiver_1) = ideal_ot_pair::<Block>();
        let (ot_sender_1, ot_receiver_0) = ideal_ot_pair::<Block>();

        let mut source_0 = OLETripleSource::new(
            Role::Initiator,
            OTProvider::<_, P256>::new(ot_sender_0),
            OTEvaluator::<_, P256>::new(ot_receiver_0),
        );
        let mut source_1 = OLETripleSource::new(
            Role::Responder,
            OTProvider::<_, P256>::new(ot_sender_1),
            OTEvaluator::<_, P256>::new(ot_receiver_1),
        );

        tokio::try_join!(source_0.setup(&mut ctx_0), source_1.setup(&mut ctx_1)).unwrap();

        let (triples_0, triples_1) = tokio::try_join!(
            source_0.generate(&mut ctx_0, 3),
            source_1.generate(&mut ctx_1, 3)
        )
        .unwrap();

        assert_triples(&mut ctx_0, &mut ctx_1, &triples_0, &triples_1).await;
    }

    #[tokio::test]
    async fn test_ole_triples_rot() {
        let (mut ctx_0, mut ctx_1) = test_st_executor(8);
        let (rot_sender_0, rot_receiver_1) = ideal_random_ot_pair([0; 32]);
        let (rot_sender_1, rot_receiver_0) = ideal_random_ot_pair([1; 32]);

        let mut source_0 = OLETripleSource::new(
            Role::Initiator,
            OLEProvider::<_, P256>::new(ROLEProvider::<_, P256>::new(rot_sender_0)),
            OLEEvaluator::<_, P256>::new(ROLEEvaluator::<_, P256>::new(rot_receiver_0)),
        );
        let mut source_1 = OLETripleSource::new(
            Role::Responder,
            OLEProvider::<_, P256>::new(ROLEProvider::<_, P256>::new(rot_sender_1)),
            OLEEvaluator::<_, P256>::new(ROLEEvaluator::<_, P256>::new(rot_receiver_1)),
        );

        tokio::try_join!(source_0.setup(&mut ctx_0), source_1.setup(&mut ctx_1)).unwrap();

        let (triples_0, triples_1) = tokio::try_join!(
            source_0.generate(&mut ctx_0, 4),
            source_1.generate(&mut ctx_1, 4)
        )
        .unwrap();

        assert_triples(&mut ctx_0, &mut ctx_1, &triples_0, &triples_1).await;
    }
}
