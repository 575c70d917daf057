//! The point-addition session.
//!
//! A session moves through its phases in a fixed order:
//!
//! `Init` → `RoleSetup` → `InputSharing` → `TripleProvisioning` → `CircuitEvaluation` →
//! `Opening` → `OutputResharing`
//!
//! Each state is named after the phase it completed. Every transition consumes the session, so a
//! phase can not be repeated or skipped, and an error drops the session without a partial result.

use ecadd_common::{Context, Role};
use ecadd_fields::{p256::P256, U256};
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use serio::{stream::IoStreamExt, SinkExt};
use tracing::{debug, instrument};

use crate::{
    circuit::add_points,
    point::{Point, SharedPoint},
    pool::TriplePool,
    share::{open_many, share_inputs, Share},
    triple::TripleSource,
    ArithError, SessionConfig, SessionError,
};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Init {}
    impl Sealed for super::RoleSetup {}
    impl Sealed for super::InputSharing {}
    impl Sealed for super::TripleProvisioning {}
    impl Sealed for super::CircuitEvaluation {}
    impl Sealed for super::Opening {}
    impl Sealed for super::OutputResharing {}
}

/// A session state.
pub trait State: sealed::Sealed {
    /// The name of the state.
    const NAME: &'static str;
}

/// The session has been created.
#[derive(Debug)]
pub struct Init;

/// The triple source has been set up.
#[derive(Debug)]
pub struct RoleSetup;

/// Both points have been shared.
#[derive(Debug)]
pub struct InputSharing {
    p: SharedPoint<P256>,
    q: SharedPoint<P256>,
}

/// Triples have been provisioned.
#[derive(Debug)]
pub struct TripleProvisioning {
    p: SharedPoint<P256>,
    q: SharedPoint<P256>,
    pool: TriplePool<P256>,
}

/// The sum has been computed on shares.
#[derive(Debug)]
pub struct CircuitEvaluation {
    sum: SharedPoint<P256>,
}

/// The sum has been opened.
#[derive(Debug)]
pub struct Opening {
    sum: Point,
}

/// The sum has been re-shared modulo `2^256`.
#[derive(Debug)]
pub struct OutputResharing {
    output: OutputShares,
}

macro_rules! impl_state {
    ($($state:ident),*) => {
        $(
            impl State for $state {
                const NAME: &'static str = stringify!($state);
            }
        )*
    };
}

impl_state!(
    Init,
    RoleSetup,
    InputSharing,
    TripleProvisioning,
    CircuitEvaluation,
    Opening,
    OutputResharing
);

/// One participant's shares of the sum, modulo `2^256`.
///
/// Adding both participants' shares with wrapping addition yields the coordinates of the sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputShares {
    /// Share of the x-coordinate.
    pub x: U256,
    /// Share of the y-coordinate.
    pub y: U256,
}

impl OutputShares {
    /// Combines both participants' shares into the sum.
    pub fn combine(&self, other: &Self) -> (U256, U256) {
        (self.x.wrapping_add(&other.x), self.y.wrapping_add(&other.y))
    }
}

/// A two-party session computing the sum of both participants' points.
#[derive(Debug)]
pub struct Session<S: State = Init> {
    config: SessionConfig,
    state: S,
}

impl<S: State> Session<S> {
    /// Returns the name of the current state.
    pub fn state(&self) -> &'static str {
        S::NAME
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn role(&self) -> Role {
        self.config.role()
    }

    fn advance<T: State>(self, f: impl FnOnce(S) -> T) -> Session<T> {
        debug!(from = S::NAME, to = T::NAME, "session advanced");
        Session {
            config: self.config,
            state: f(self.state),
        }
    }
}

impl Session<Init> {
    /// Creates a new session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: Init,
        }
    }

    /// Runs all phases of the session and returns this participant's output shares.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `source` - The source of triples.
    /// * `point` - This participant's point.
    pub async fn execute<Ctx, T>(
        self,
        ctx: &mut Ctx,
        source: &mut T,
        point: Point,
    ) -> Result<OutputShares, SessionError>
    where
        Ctx: Context,
        T: TripleSource<Ctx, P256>,
    {
        let output = self
            .setup(ctx, source)
            .await?
            .share_inputs(ctx, point)
            .await?
            .provision_triples(ctx, source)
            .await?
            .evaluate(ctx)
            .await?
            .open(ctx)
            .await?
            .reshare(ctx)
            .await?
            .finish();

        Ok(output)
    }

    /// Sets up the triple source.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn setup<Ctx, T>(
        self,
        ctx: &mut Ctx,
        source: &mut T,
    ) -> Result<Session<RoleSetup>, SessionError>
    where
        Ctx: Context,
        T: TripleSource<Ctx, P256>,
    {
        source.setup(ctx).await?;

        Ok(self.advance(|_| RoleSetup))
    }
}

impl Session<RoleSetup> {
    /// Shares this participant's point and receives shares of the peer's point.
    ///
    /// Fails with [`SessionError::InvalidPoint`] before sending anything if the point is not on
    /// the curve.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn share_inputs<Ctx: Context>(
        self,
        ctx: &mut Ctx,
        point: Point,
    ) -> Result<Session<InputSharing>, SessionError> {
        if !point.is_on_curve() {
            return Err(SessionError::InvalidPoint);
        }

        let (own, peer) = share_inputs(ctx, self.role(), &[point.x, point.y]).await?;
        let (own, peer) = (shared_point(&own)?, shared_point(&peer)?);

        // The initiator's point is the first summand.
        let (p, q) = match self.role() {
            Role::Initiator => (own, peer),
            Role::Responder => (peer, own),
        };

        Ok(self.advance(|_| InputSharing { p, q }))
    }
}

impl Session<InputSharing> {
    /// Provisions the configured number of triples.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn provision_triples<Ctx, T>(
        self,
        ctx: &mut Ctx,
        source: &mut T,
    ) -> Result<Session<TripleProvisioning>, SessionError>
    where
        Ctx: Context,
        T: TripleSource<Ctx, P256>,
    {
        let count = self.config.triple_batch();
        let triples = source.generate(ctx, count).await?;

        debug!(count, "provisioned triples");

        Ok(self.advance(|InputSharing { p, q }| TripleProvisioning {
            p,
            q,
            pool: TriplePool::new(triples),
        }))
    }
}

impl Session<TripleProvisioning> {
    /// Computes the sum of both points on shares.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn evaluate<Ctx: Context>(
        mut self,
        ctx: &mut Ctx,
    ) -> Result<Session<CircuitEvaluation>, SessionError> {
        let role = self.role();
        let method = self.config.inversion();
        let TripleProvisioning { p, q, pool } = &mut self.state;

        let sum = add_points(ctx, role, pool, *p, *q, method).await?;

        debug!(
            consumed = pool.consumed(),
            remaining = pool.remaining(),
            "evaluated point addition"
        );

        Ok(self.advance(|_| CircuitEvaluation { sum }))
    }
}

impl Session<CircuitEvaluation> {
    /// Opens the sum to both participants.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn open<Ctx: Context>(
        self,
        ctx: &mut Ctx,
    ) -> Result<Session<Opening>, SessionError> {
        let sum = self.state.sum;
        let opened = open_many(ctx, self.role(), &[sum.x, sum.y]).await?;

        let sum = Point::new(opened[0], opened[1]);

        Ok(self.advance(|_| Opening { sum }))
    }
}

impl Session<Opening> {
    /// Re-shares the opened sum modulo `2^256`.
    ///
    /// The initiator samples its shares and sends the complements to the responder.
    #[instrument(level = "debug", skip_all, err)]
    pub async fn reshare<Ctx: Context>(
        self,
        ctx: &mut Ctx,
    ) -> Result<Session<OutputResharing>, SessionError> {
        let x = U256::from(self.state.sum.x);
        let y = U256::from(self.state.sum.y);

        let output = match self.role() {
            Role::Initiator => {
                let own: OutputShares = {
                    let mut rng = thread_rng();
                    OutputShares {
                        x: rng.gen(),
                        y: rng.gen(),
                    }
                };

                ctx.io_mut()
                    .send(OutputShares {
                        x: x.wrapping_sub(&own.x),
                        y: y.wrapping_sub(&own.y),
                    })
                    .await?;

                own
            }
            Role::Responder => ctx.io_mut().expect_next().await?,
        };

        Ok(self.advance(|_| OutputResharing { output }))
    }
}

impl Session<OutputResharing> {
    /// Returns this participant's output shares.
    pub fn output(&self) -> OutputShares {
        self.state.output
    }

    /// Finishes the session, returning this participant's output shares.
    pub fn finish(self) -> OutputShares {
        self.state.output
    }
}

fn shared_point(shares: &[Share<P256>]) -> Result<SharedPoint<P256>, SessionError> {
    match shares {
        [x, y] => Ok(SharedPoint { x: *x, y: *y }),
        _ => Err(ArithError::LengthMismatch {
            expected: 2,
            actual: shares.len(),
        }
        .into()),
    }
}
