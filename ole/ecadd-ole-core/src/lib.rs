//! Core logic of the OT-multiplication primitive.
//!
//! This crate contains the message computations of the protocols turning oblivious transfers into
//! additive shares of a product of field elements, without any IO:
//!
//! * [`bits`]: the bit-serial construction, two 128-bit OTs per bit of the receiver's input.
//! * [`role`]: random OLE with errors built from random OT.
//! * [`ole`]: derandomization of random OLE into OLE with chosen inputs.
//! * [`ideal`]: ideal functionalities for testing.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod bits;
pub mod ideal;
pub mod ole;
pub mod role;

use ecadd_core::{aes::expand_label, Block, Label};
use ecadd_fields::Field;

/// An OLE core error.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum OLECoreError {
    #[error("{0}")]
    LengthMismatch(String),
}

/// Workaround because of feature `generic_const_exprs` not available in stable.
///
/// Checks at compile-time that an element of the field fits into two blocks.
struct Check<F: Field>(std::marker::PhantomData<F>);

impl<F: Field> Check<F> {
    const FITS_TWO_BLOCKS: () = assert!(
        F::BIT_SIZE as usize <= 2 * Block::LEN * 8,
        "Field elements must fit into two blocks."
    );
}

/// Splits a field element into its high and low 128-bit halves of the 32-byte big-endian
/// encoding.
pub fn to_halves<F: Field>(value: F) -> [Block; 2] {
    let bytes = value.to_be_bytes();

    let mut buf = [0u8; 2 * Block::LEN];
    buf[2 * Block::LEN - bytes.len()..].copy_from_slice(&bytes);

    let mut high = [0u8; Block::LEN];
    let mut low = [0u8; Block::LEN];
    high.copy_from_slice(&buf[..Block::LEN]);
    low.copy_from_slice(&buf[Block::LEN..]);

    [Block::new(high), Block::new(low)]
}

/// Reassembles a field element from its high and low halves, reducing modulo the field order.
pub fn from_halves<F: Field>(high: Block, low: Block) -> F {
    let mut buf = [0u8; 2 * Block::LEN];
    buf[..Block::LEN].copy_from_slice(high.as_ref());
    buf[Block::LEN..].copy_from_slice(low.as_ref());

    F::from_be_bytes_mod_order(&buf)
}

/// Derives a field element mask from a label, using the label as an AES key.
pub fn expand_to_field<F: Field>(label: Label) -> F {
    F::from_be_bytes_mod_order(&expand_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecadd_core::prg::Prg;
    use ecadd_fields::{p256::P256, UniformRand};
    use rand::SeedableRng;

    #[test]
    fn test_halves() {
        let mut rng = Prg::from_seed(Block::ZERO);

        for _ in 0..16 {
            let value = P256::rand(&mut rng);
            let [high, low] = to_halves(value);
            assert_eq!(from_halves::<P256>(high, low), value);
        }

        let [high, low] = to_halves(P256::from(1u64));
        assert_eq!(high, Block::ZERO);
        assert_eq!(low.to_bytes()[15], 1);
    }

    #[test]
    fn test_expand_to_field_deterministic() {
        let label = Block::from_counter(42);

        assert_eq!(
            expand_to_field::<P256>(label),
            expand_to_field::<P256>(label)
        );
        assert_ne!(
            expand_to_field::<P256>(label),
            expand_to_field::<P256>(Block::from_counter(43))
        );
    }
}
