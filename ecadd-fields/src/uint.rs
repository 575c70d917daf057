//! A fixed-width 256-bit unsigned integer.

use ark_ff::{BigInt, BigInteger};
use itybity::{BitIterable, BitLength, FromBitIterator, GetBit, Lsb0, Msb0};
use rand::{distributions::Standard, prelude::Distribution, Rng};
use serde::{Deserialize, Serialize};

/// An unsigned 256-bit integer with arithmetic modulo `2^256`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[u8; 32]")]
#[serde(from = "[u8; 32]")]
pub struct U256(pub(crate) BigInt<4>);

opaque_debug::implement!(U256);

impl U256 {
    /// Zero.
    pub const ZERO: Self = Self(BigInt::new([0; 4]));

    /// Creates an integer from little-endian 64-bit limbs.
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(BigInt::new(limbs))
    }

    /// Returns the little-endian 64-bit limbs.
    pub fn limbs(&self) -> [u64; 4] {
        self.0 .0
    }

    /// Creates an integer from its big-endian encoding.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let limbs = std::array::from_fn(|i| {
            let start = 32 - 8 * (i + 1);
            let mut limb = [0u8; 8];
            limb.copy_from_slice(&bytes[start..start + 8]);
            u64::from_be_bytes(limb)
        });

        Self(BigInt::new(limbs))
    }

    /// Returns the big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, limb) in self.0 .0.iter().enumerate() {
            let start = 32 - 8 * (i + 1);
            bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Computes `self + rhs mod 2^256`.
    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        let mut out = self.0;
        let _carry = out.add_with_carry(&rhs.0);
        Self(out)
    }

    /// Computes `self - rhs mod 2^256`.
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        let mut out = self.0;
        let _borrow = out.sub_with_borrow(&rhs.0);
        Self(out)
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.0 .0.iter().map(|limb| limb.count_ones()).sum()
    }

    /// Returns the position of the highest set bit plus one, or zero if the integer is zero.
    pub fn bit_len(&self) -> usize {
        self.0.num_bits() as usize
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<U256> for [u8; 32] {
    fn from(value: U256) -> Self {
        value.to_be_bytes()
    }
}

impl From<[u8; 32]> for U256 {
    fn from(value: [u8; 32]) -> Self {
        Self::from_be_bytes(value)
    }
}

impl Distribution<U256> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> U256 {
        U256(BigInt::new(rng.gen()))
    }
}

impl BitLength for U256 {
    const BITS: usize = 256;
}

impl GetBit<Lsb0> for U256 {
    fn get_bit(&self, index: usize) -> bool {
        self.0.get_bit(index)
    }
}

impl GetBit<Msb0> for U256 {
    fn get_bit(&self, index: usize) -> bool {
        self.0.get_bit(255 - index)
    }
}

impl BitIterable for U256 {}

impl FromBitIterator for U256 {
    fn from_lsb0_iter(iter: impl IntoIterator<Item = bool>) -> Self {
        let mut limbs = [0u64; 4];
        for (i, bit) in iter.into_iter().take(256).enumerate() {
            limbs[i / 64] |= (bit as u64) << (i % 64);
        }
        Self(BigInt::new(limbs))
    }

    /// Bit `i` of the iterator is bit `255 - i` of the integer, missing low bits are zero.
    fn from_msb0_iter(iter: impl IntoIterator<Item = bool>) -> Self {
        let mut limbs = [0u64; 4];
        for (i, bit) in iter.into_iter().take(256).enumerate() {
            let index = 255 - i;
            limbs[index / 64] |= (bit as u64) << (index % 64);
        }
        Self(BigInt::new(limbs))
    }
}
