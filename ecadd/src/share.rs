//! Additive shares and the protocols for sharing and opening them.
//!
//! A value `v` is shared between the participants as `v = s_0 + s_1`. Linear operations on
//! shares are local; opening needs one exchange.

use std::ops::{Add, Neg, Sub};

use ecadd_common::{exchange, Context, Role};
use ecadd_fields::Field;
use rand::thread_rng;
use serio::{stream::IoStreamExt, SinkExt};

use crate::ArithError;

/// One participant's additive share of a field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share<F>(F);

impl<F: Field> Share<F> {
    /// Creates a share from a raw value.
    pub fn new(value: F) -> Self {
        Self(value)
    }

    /// Returns the share of zero.
    pub fn zero() -> Self {
        Self(F::zero())
    }

    /// Returns a share of the public constant `c`.
    ///
    /// The initiator holds `c`, the responder holds zero.
    pub fn public(role: Role, c: F) -> Self {
        Self::zero().add_public(role, c)
    }

    /// Returns a uniformly random share.
    ///
    /// If both participants call this, the shared value is jointly random and unknown to either.
    pub fn random() -> Self {
        Self(F::rand(&mut thread_rng()))
    }

    /// Returns the raw share value.
    pub fn value(&self) -> F {
        self.0
    }

    /// Multiplies the shared value by a public constant.
    pub fn mul_public(self, c: F) -> Self {
        Self(self.0 * c)
    }

    /// Adds a public constant to the shared value.
    pub fn add_public(self, role: Role, c: F) -> Self {
        match role {
            Role::Initiator => Self(self.0 + c),
            Role::Responder => self,
        }
    }
}

impl<F: Field> Add for Share<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<F: Field> Sub for Share<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<F: Field> Neg for Share<F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Splits `value` into a random share kept by the owner and the complement for the peer.
fn split<F: Field>(value: F) -> (Share<F>, F) {
    let s = F::rand(&mut thread_rng());
    (Share(s), value - s)
}

/// Shares a private value with the peer, who calls [`receive_input`].
pub async fn share_input<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    value: F,
) -> Result<Share<F>, ArithError> {
    let (own, peer) = split(value);
    ctx.io_mut().send(peer).await?;

    Ok(own)
}

/// Receives a share of a value owned by the peer, who calls [`share_input`].
pub async fn receive_input<Ctx: Context, F: Field>(ctx: &mut Ctx) -> Result<Share<F>, ArithError> {
    let value: F = ctx.io_mut().expect_next().await?;

    Ok(Share(value))
}

/// Shares the private `values` of both participants in one exchange.
///
/// Returns the shares of this participant's values and the shares of the peer's values.
pub async fn share_inputs<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    values: &[F],
) -> Result<(Vec<Share<F>>, Vec<Share<F>>), ArithError> {
    let (own, complements): (Vec<_>, Vec<_>) = values.iter().map(|&v| split(v)).unzip();

    let peer: Vec<F> = exchange(ctx, role, complements).await?;

    Ok((own, peer.into_iter().map(Share).collect()))
}

/// Opens a shared value to both participants.
pub async fn open<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    share: Share<F>,
) -> Result<F, ArithError> {
    let peer: F = exchange(ctx, role, share.0).await?;

    Ok(share.0 + peer)
}

/// Opens many shared values to both participants with one message in each direction.
pub async fn open_many<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    shares: &[Share<F>],
) -> Result<Vec<F>, ArithError> {
    let own: Vec<F> = shares.iter().map(|s| s.0).collect();
    let peer: Vec<F> = exchange(ctx, role, own.clone()).await?;

    if peer.len() != own.len() {
        return Err(ArithError::LengthMismatch {
            expected: own.len(),
            actual: peer.len(),
        });
    }

    Ok(own.into_iter().zip(peer).map(|(a, b)| a + b).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecadd_common::executor::test_st_executor;
    use ecadd_core::{prg::Prg, Block};
    use ecadd_fields::{p256::P256, UniformRand};
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case::initiator_owns(Role::Initiator)]
    #[case::responder_owns(Role::Responder)]
    #[tokio::test]
    async fn test_share_and_open(#[case] owner: Role) {
        let mut rng = Prg::from_seed(Block::ZERO);
        let value = P256::rand(&mut rng);
        let (mut ctx_owner, mut ctx_peer) = test_st_executor(8);

        let (owner_share, peer_share) = tokio::try_join!(
            share_input(&mut ctx_owner, value),
            receive_input::<_, P256>(&mut ctx_peer)
        )
        .unwrap();

        let (a, b) = tokio::try_join!(
            open(&mut ctx_owner, owner, owner_share),
            open(&mut ctx_peer, owner.peer(), peer_share)
        )
        .unwrap();

        assert_eq!(a, value);
        assert_eq!(b, value);
    }

    #[tokio::test]
    async fn test_share_inputs() {
        let mut rng = Prg::from_seed(Block::ZERO);
        let values_0: Vec<P256> = (0..3).map(|_| P256::rand(&mut rng)).collect();
        let values_1: Vec<P256> = (0..3).map(|_| P256::rand(&mut rng)).collect();
        let (mut ctx_0, mut ctx_1) = test_st_executor(8);

        let ((own_0, peer_0), (own_1, peer_1)) = tokio::try_join!(
            share_inputs(&mut ctx_0, Role::Initiator, &values_0),
            share_inputs(&mut ctx_1, Role::Responder, &values_1)
        )
        .unwrap();

        let shares_0: Vec<_> = own_0.into_iter().chain(peer_0).collect();
        let shares_1: Vec<_> = peer_1.into_iter().chain(own_1).collect();

        let (opened, _) = tokio::try_join!(
            open_many(&mut ctx_0, Role::Initiator, &shares_0),
            open_many(&mut ctx_1, Role::Responder, &shares_1)
        )
        .unwrap();

        let expected: Vec<P256> = values_0.into_iter().chain(values_1).collect();
        assert_eq!(opened, expected);
    }

    #[tokio::test]
    async fn test_open_many_length_mismatch() {
        let (mut ctx_0, mut ctx_1) = test_st_executor(8);
        let shares_0 = vec![Share::new(P256::one()); 2];
        let shares_1 = vec![Share::new(P256::one()); 3];

        let (res_0, res_1) = tokio::join!(
            open_many(&mut ctx_0, Role::Initiator, &shares_0),
            open_many(&mut ctx_1, Role::Responder, &shares_1)
        );

        assert!(matches!(
            res_0,
            Err(ArithError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(res_1.is_err());
    }

    #[test]
    fn test_linear_ops() {
        let a = P256::from(10u64);
        let b = P256::from(4u64);
        let c = P256::from(7u64);

        let (a0, a1) = (Share::new(P256::from(3u64)), Share::new(P256::from(7u64)));
        let (b0, b1) = (Share::new(-P256::from(1u64)), Share::new(P256::from(5u64)));

        assert_eq!((a0 + b0).value() + (a1 + b1).value(), a + b);
        assert_eq!((a0 - b0).value() + (a1 - b1).value(), a - b);
        assert_eq!((-a0).value() + (-a1).value(), -a);
        assert_eq!(
            a0.mul_public(c).value() + a1.mul_public(c).value(),
            a * c
        );
        assert_eq!(
            a0.add_public(Role::Initiator, c).value() + a1.add_public(Role::Responder, c).value(),
            a + c
        );
    }
}
