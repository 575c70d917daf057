//! Secure arithmetic on shares.
//!
//! Every multiplication consumes one triple from the pool. Both participants must call the same
//! operations in the same order.

use ecadd_common::{Context, Role};
use ecadd_fields::{Field, U256};
use itybity::{GetBit, Msb0};
use tracing::trace;

use crate::{
    point::SharedPoint,
    pool::TriplePool,
    share::{open, open_many},
    ArithError, InversionMethod, Share,
};

/// Multiplies two shared values.
pub async fn mul<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    pool: &mut TriplePool<F>,
    x: Share<F>,
    y: Share<F>,
) -> Result<Share<F>, ArithError> {
    let mut products = mul_many(ctx, role, pool, &[(x, y)]).await?;

    products.pop().ok_or(ArithError::LengthMismatch {
        expected: 1,
        actual: 0,
    })
}

/// Multiplies many pairs of shared values, opening all masked values with one message in each
/// direction.
pub async fn mul_many<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    pool: &mut TriplePool<F>,
    pairs: &[(Share<F>, Share<F>)],
) -> Result<Vec<Share<F>>, ArithError> {
    let triples = pool.take_many(pairs.len())?;

    let masked: Vec<Share<F>> = pairs
        .iter()
        .zip(&triples)
        .flat_map(|(&(x, y), t)| [x - t.a, y - t.b])
        .collect();

    let opened = open_many(ctx, role, &masked).await?;

    Ok(opened
        .chunks_exact(2)
        .zip(&triples)
        .map(|(de, t)| {
            let (d, e) = (de[0], de[1]);
            (t.c + t.b.mul_public(d) + t.a.mul_public(e)).add_public(role, d * e)
        })
        .collect())
}

/// Squares a shared value.
pub async fn square<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    pool: &mut TriplePool<F>,
    x: Share<F>,
) -> Result<Share<F>, ArithError> {
    mul(ctx, role, pool, x, x).await
}

/// Raises a shared value to a public exponent, square-and-multiply from the most significant bit.
pub async fn pow_public<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    pool: &mut TriplePool<F>,
    x: Share<F>,
    exponent: &U256,
) -> Result<Share<F>, ArithError> {
    let len = exponent.bit_len();
    if len == 0 {
        return Ok(Share::public(role, F::one()));
    }

    // The leading bit initializes the accumulator.
    let mut acc = x;
    for i in (256 - len + 1)..256 {
        acc = square(ctx, role, pool, acc).await?;
        if GetBit::<Msb0>::get_bit(exponent, i) {
            acc = mul(ctx, role, pool, acc, x).await?;
        }
    }

    Ok(acc)
}

/// Returns the number of triples [`pow_public`] consumes.
pub fn pow_cost(exponent: &U256) -> usize {
    match exponent.bit_len() {
        0 => 0,
        len => (len - 1) + (exponent.count_ones() as usize - 1),
    }
}

/// Inverts a shared value.
///
/// Fails with [`ArithError::ZeroInversion`] if the value is zero. Nothing else about the value is
/// revealed.
pub async fn inverse<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    pool: &mut TriplePool<F>,
    x: Share<F>,
    method: InversionMethod,
) -> Result<Share<F>, ArithError> {
    trace!(?method, "inverting shared value");
    match method {
        InversionMethod::Exponentiation => {
            let exponent = fermat_exponent::<F>();
            let y = pow_public(ctx, role, pool, x, &exponent).await?;

            // x * x^(p-2) is 1 for non-zero x and 0 otherwise.
            let check = mul(ctx, role, pool, x, y).await?;
            if open(ctx, role, check).await?.is_zero() {
                return Err(ArithError::ZeroInversion);
            }

            Ok(y)
        }
        InversionMethod::MaskedOpen => {
            let r = Share::random();
            let w = mul(ctx, role, pool, x, r).await?;
            let w = open(ctx, role, w).await?;

            let w_inv = w.inverse().ok_or(ArithError::ZeroInversion)?;

            Ok(r.mul_public(w_inv))
        }
    }
}

/// Returns the number of triples [`inverse`] consumes.
pub fn inverse_cost<F: Field>(method: InversionMethod) -> usize {
    match method {
        InversionMethod::Exponentiation => pow_cost(&fermat_exponent::<F>()) + 1,
        InversionMethod::MaskedOpen => 1,
    }
}

/// Adds two shared points with the affine addition formula.
///
/// The points must have distinct x-coordinates. Otherwise the inversion of `x2 - x1` fails with
/// [`ArithError::ZeroInversion`].
pub async fn add_points<Ctx: Context, F: Field>(
    ctx: &mut Ctx,
    role: Role,
    pool: &mut TriplePool<F>,
    p: SharedPoint<F>,
    q: SharedPoint<F>,
    method: InversionMethod,
) -> Result<SharedPoint<F>, ArithError> {
    let dx = q.x - p.x;
    let dy = q.y - p.y;

    let dx_inv = inverse(ctx, role, pool, dx, method).await?;
    let lambda = mul(ctx, role, pool, dy, dx_inv).await?;
    let lambda_sq = square(ctx, role, pool, lambda).await?;

    let x = lambda_sq - p.x - q.x;
    let y = mul(ctx, role, pool, lambda, p.x - x).await? - p.y;

    Ok(SharedPoint { x, y })
}

/// Returns the number of triples [`add_points`] consumes.
pub fn triples_required<F: Field>(method: InversionMethod) -> usize {
    inverse_cost::<F>(method) + 3
}

fn fermat_exponent<F: Field>() -> U256 {
    F::MODULUS.wrapping_sub(&U256::from(2u64))
}
