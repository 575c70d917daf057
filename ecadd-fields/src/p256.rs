//! This module implements the base field of the NIST P-256 curve.

use std::ops::{Add, Mul, Neg, Sub};

use ark_ff::{BigInteger, Field as ArkField, One, PrimeField, Zero};
use ark_secp256r1::fq::Fq;
use itybity::{BitLength, FromBitIterator, GetBit, Lsb0, Msb0};
use num_bigint::ToBigUint;
use rand::{distributions::Standard, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::{Field, FieldError, U256};

/// A type for holding field elements of P256.
///
/// Elements are always canonical, i.e. in `[0, p-1]`, and are encoded as 32 big-endian bytes.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[u8; 32]")]
#[serde(try_from = "[u8; 32]")]
pub struct P256(pub(crate) Fq);

opaque_debug::implement!(P256);

impl P256 {
    /// Creates a new field element, reducing the value modulo p.
    ///
    /// Returns `None` if the value can not be represented as an unsigned integer.
    pub fn new(value: impl ToBigUint) -> Option<Self> {
        value.to_biguint().map(|input| P256(Fq::from(input)))
    }

    /// Decodes a canonical big-endian encoding.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, FieldError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| FieldError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;

        Self::try_from(bytes)
    }
}

impl From<P256> for [u8; 32] {
    fn from(value: P256) -> Self {
        U256::from(value).to_be_bytes()
    }
}

impl TryFrom<[u8; 32]> for P256 {
    type Error = FieldError;

    /// Converts big-endian bytes into a P256 field element, rejecting values >= p.
    fn try_from(value: [u8; 32]) -> Result<Self, Self::Error> {
        Fq::from_bigint(U256::from_be_bytes(value).0)
            .map(P256)
            .ok_or(FieldError::NonCanonical)
    }
}

impl From<P256> for U256 {
    fn from(value: P256) -> Self {
        U256(value.0.into_bigint())
    }
}

impl Distribution<P256> for Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> P256 {
        P256(self.sample(rng))
    }
}

impl Add for P256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for P256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for P256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Neg for P256 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Field for P256 {
    const BIT_SIZE: u32 = 256;

    const MODULUS: U256 = U256::from_limbs([
        0xffff_ffff_ffff_ffff,
        0x0000_0000_ffff_ffff,
        0x0000_0000_0000_0000,
        0xffff_ffff_0000_0001,
    ]);

    fn zero() -> Self {
        P256(<Fq as Zero>::zero())
    }

    fn one() -> Self {
        P256(<Fq as One>::one())
    }

    fn two_pow(rhs: u32) -> Self {
        P256(Fq::from(2u64).pow([rhs as u64]))
    }

    fn inverse(self) -> Option<Self> {
        ArkField::inverse(&self.0).map(P256)
    }

    fn to_be_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_be()
    }

    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        P256(Fq::from_be_bytes_mod_order(bytes))
    }
}

impl BitLength for P256 {
    const BITS: usize = 256;
}

impl GetBit<Lsb0> for P256 {
    fn get_bit(&self, index: usize) -> bool {
        self.0.into_bigint().get_bit(index)
    }
}

impl GetBit<Msb0> for P256 {
    fn get_bit(&self, index: usize) -> bool {
        self.0.into_bigint().get_bit(255 - index)
    }
}

impl FromBitIterator for P256 {
    /// Reduces the 256-bit integer modulo p, so every encoding is accepted.
    fn from_lsb0_iter(iter: impl IntoIterator<Item = bool>) -> Self {
        Self::from_be_bytes_mod_order(&U256::from_lsb0_iter(iter).to_be_bytes())
    }

    fn from_msb0_iter(iter: impl IntoIterator<Item = bool>) -> Self {
        Self::from_be_bytes_mod_order(&U256::from_msb0_iter(iter).to_be_bytes())
    }
}

impl From<u64> for P256 {
    fn from(value: u64) -> Self {
        P256(Fq::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecadd_core::{prg::Prg, Block};
    use rand::{Rng, SeedableRng};

    use crate::tests::{test_field_basic, test_field_bit_ops, test_field_inverse_agree};

    #[test]
    fn test_p256_basic() {
        test_field_basic::<P256>();
        assert_eq!(P256::new(0).unwrap(), P256::zero());
        assert_eq!(P256::new(1).unwrap(), P256::one());
    }

    #[test]
    fn test_p256_inverse_agree() {
        test_field_inverse_agree::<P256>();
    }

    #[test]
    fn test_p256_bit_ops() {
        test_field_bit_ops::<P256>();
    }

    #[test]
    fn test_p256_serialize() {
        let mut rng = Prg::from_seed(Block::ZERO);

        for _ in 0..32 {
            let a: P256 = rng.gen();
            let bytes: [u8; 32] = a.into();
            let b = P256::try_from(bytes).unwrap();

            assert_eq!(a, b);
            assert_eq!(a.to_be_bytes(), bytes.to_vec());
        }
    }

    #[test]
    fn test_p256_big_endian_encoding() {
        let mut expected = [0u8; 32];
        expected[31] = 5;
        expected[30] = 1;

        assert_eq!(<[u8; 32]>::from(P256::from(261u64)), expected);
    }

    #[test]
    fn test_p256_rejects_non_canonical() {
        let p = P256::MODULUS.to_be_bytes();

        assert_eq!(P256::try_from(p), Err(FieldError::NonCanonical));
        assert_eq!(P256::try_from([0xff; 32]), Err(FieldError::NonCanonical));
        assert_eq!(
            P256::from_be_slice(&[0u8; 31]),
            Err(FieldError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );

        // Reducing the modulus itself yields zero.
        assert_eq!(P256::from_be_bytes_mod_order(&p), P256::zero());
    }

    #[test]
    fn test_p256_modulus_matches_field() {
        assert_eq!(P256::MODULUS.to_be_bytes().to_vec(), Fq::MODULUS.to_bytes_be());
        assert_eq!(-P256::one(), P256::from_be_bytes_mod_order(&{
            let mut m = P256::MODULUS.to_be_bytes();
            m[31] -= 1;
            m
        }));
    }

    #[test]
    fn test_p256_pow() {
        let mut rng = Prg::from_seed(Block::ONES);
        let a: P256 = rng.gen();

        assert_eq!(a.pow(&U256::from(0u64)), P256::one());
        assert_eq!(a.pow(&U256::from(1u64)), a);
        assert_eq!(a.pow(&U256::from(5u64)), a * a * a * a * a);
        assert_eq!(P256::two_pow(10), P256::from(1024u64));
    }

    #[test]
    fn test_p256_non_canonical_bits_reduce() {
        // Encoding `3 + p` as bits still represents 3.
        let encoded = P256::MODULUS.wrapping_add(&U256::from(3u64));
        let bits: Vec<bool> = (0..256).map(|i| GetBit::<Lsb0>::get_bit(&encoded, i)).collect();

        assert_eq!(P256::from_lsb0_iter(bits), P256::from(3u64));
    }
}
