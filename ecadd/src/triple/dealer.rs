use async_trait::async_trait;
use ecadd_common::{Context, Role};
use ecadd_fields::Field;
use rand::thread_rng;
use serio::{stream::IoStreamExt, SinkExt};
use tracing::{debug, instrument};

use crate::{
    triple::{Triple, TripleSource},
    Share, TripleError,
};

/// Generates triples with the initiator acting as a trusted dealer.
///
/// The initiator samples `a`, `b` and `c = a * b`, splits them and sends the responder's shares
/// in one message. The initiator learns every triple, so the responder's privacy depends on
/// trusting the initiator.
#[derive(Debug)]
pub struct DealerTripleSource {
    role: Role,
}

impl DealerTripleSource {
    /// Creates a new [`DealerTripleSource`].
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

#[async_trait]
impl<Ctx: Context, F: Field> TripleSource<Ctx, F> for DealerTripleSource {
    async fn setup(&mut self, _ctx: &mut Ctx) -> Result<(), TripleError> {
        Ok(())
    }

    #[instrument(level = "debug", skip_all, err)]
    async fn generate(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<Vec<Triple<F>>, TripleError> {
        let triples = match self.role {
            Role::Initiator => {
                let (own, peer): (Vec<Triple<F>>, Vec<[F; 3]>) = {
                    let mut rng = thread_rng();
                    (0..count)
                        .map(|_| {
                            let a = F::rand(&mut rng);
                            let b = F::rand(&mut rng);
                            let c = a * b;

                            let [a_0, b_0, c_0] = [(); 3].map(|_| F::rand(&mut rng));

                            (
                                Triple {
                                    a: Share::new(a_0),
                                    b: Share::new(b_0),
                                    c: Share::new(c_0),
                                },
                                [a - a_0, b - b_0, c - c_0],
                            )
                        })
                        .unzip()
                };

                ctx.io_mut().send(peer).await?;

                own
            }
            Role::Responder => {
                let shares: Vec<[F; 3]> = ctx.io_mut().expect_next().await?;

                if shares.len() != count {
                    return Err(TripleError::LengthMismatch {
                        expected: count,
                        actual: shares.len(),
                    });
                }

                shares
                    .into_iter()
                    .map(|[a, b, c]| Triple {
                        a: Share::new(a),
                        b: Share::new(b),
                        c: Share::new(c),
                    })
                    .collect()
            }
        };

        debug!(count, "dealt triples");

        Ok(triples)
    }
}
