//! This crate provides types for working with the base field of P-256.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod p256;
mod uint;

pub use uint::U256;

use std::{
    fmt::Debug,
    ops::{Add, Mul, Neg, Sub},
};

use itybity::{BitLength, FromBitIterator, GetBit, Lsb0, Msb0};
use rand::{distributions::Standard, prelude::Distribution, Rng};
use serde::{de::DeserializeOwned, Serialize};

/// Errors that can occur when decoding field elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The encoded integer is not reduced modulo the field prime.
    #[error("encoded value is not a canonical field element")]
    NonCanonical,
    /// The encoding has the wrong number of bytes.
    #[error("invalid encoding length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        actual: usize,
    },
}

/// A trait for finite fields.
pub trait Field:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Copy
    + Clone
    + Debug
    + 'static
    + Send
    + Sync
    + UniformRand
    + PartialOrd
    + Ord
    + PartialEq
    + Eq
    + FromBitIterator
    + GetBit<Lsb0>
    + GetBit<Msb0>
    + BitLength
    + Unpin
    + Serialize
    + DeserializeOwned
{
    /// The number of bits of a field element.
    const BIT_SIZE: u32;

    /// The field modulus.
    const MODULUS: U256;

    /// Return the additive identity element.
    fn zero() -> Self;

    /// Return the multiplicative identity element.
    fn one() -> Self;

    /// Return a field element from a power of two.
    fn two_pow(rhs: u32) -> Self;

    /// Return the multiplicative inverse, or `None` for zero.
    fn inverse(self) -> Option<Self>;

    /// Return field element as big-endian bytes.
    fn to_be_bytes(&self) -> Vec<u8>;

    /// Interprets big-endian bytes as an integer and reduces it into the field.
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self;

    /// Returns `true` if this is the additive identity.
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Raises the element to a public power using square-and-multiply, most significant bit
    /// first.
    fn pow(self, exponent: &U256) -> Self {
        (0..U256::BITS).fold(Self::one(), |acc, i| {
            let acc = acc * acc;
            if GetBit::<Msb0>::get_bit(exponent, i) {
                acc * self
            } else {
                acc
            }
        })
    }

    /// Return the multiplicative inverse computed as `self^(p-2)`.
    ///
    /// Zero maps to zero.
    fn inverse_fermat(self) -> Self {
        self.pow(&Self::MODULUS.wrapping_sub(&U256::from(2u64)))
    }
}

/// A trait for sampling random elements of the field.
///
/// This is helpful, because we do not need to import other traits since this is a supertrait of
/// field (which is not possible with `Standard` and `Distribution`).
pub trait UniformRand: Sized {
    /// Return a random field element.
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl<T> UniformRand for T
where
    Standard: Distribution<T>,
{
    #[inline]
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(Standard)
    }
}
