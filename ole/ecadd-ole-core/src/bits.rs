//! The bit-serial OT-multiplication protocol.
//!
//! The sender holds `v` and the receiver holds the bits `b_k` of an encoding of `b`. For every bit
//! `k` the sender offers the pair `(r_k, r_k + v * 2^k)`, split into high and low halves which are
//! transferred with two OTs under the same choice bit `b_k`. The receiver's share is the sum of
//! the chosen messages, the sender's share is `-sum(r_k)`.
//!
//! The OT payload order is: element, bit index, high half then low half, and each OT carries
//! `[choice-0, choice-1]`.

use ecadd_core::Block;
use ecadd_fields::Field;
use itybity::{GetBit, Lsb0};
use rand::thread_rng;
use std::marker::PhantomData;

use crate::{from_halves, to_halves, Check, OLECoreError};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;
    }
}

/// The number of OTs needed per multiplication.
pub fn ot_count<F: Field>() -> usize {
    2 * F::BIT_SIZE as usize
}

/// The sender of the bit-serial OT-multiplication.
#[derive(Debug)]
pub struct OTMulSender<F>(PhantomData<F>);

impl<F: Field> OTMulSender<F> {
    /// Creates a new [`OTMulSender`].
    pub fn new() -> Self {
        let _: () = Check::<F>::FITS_TWO_BLOCKS;

        Self(PhantomData)
    }

    /// Samples the masks `r_k`, one for every bit of every element.
    ///
    /// # Arguments
    ///
    /// * `count` - The number of multiplications.
    pub fn sample_masks(&self, count: usize) -> Vec<F> {
        let mut rng = thread_rng();

        (0..count * F::BIT_SIZE as usize)
            .map(|_| F::rand(&mut rng))
            .collect()
    }

    /// Creates the OT message pairs.
    ///
    /// # Arguments
    ///
    /// * `factors` - The sender's inputs `v`.
    /// * `masks` - The masks `r_k` from [`OTMulSender::sample_masks`].
    pub fn create_pairs(
        &self,
        factors: &[F],
        masks: &[F],
    ) -> Result<Vec<[Block; 2]>, OLECoreError> {
        let bits = F::BIT_SIZE as usize;

        if factors.len() * bits != masks.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of masks {} does not match {} field elements.",
                masks.len(),
                factors.len(),
            )));
        }

        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                let iter = masks.par_chunks_exact(bits).zip(factors.par_iter());
            } else {
                let iter = masks.chunks_exact(bits).zip(factors.iter());
            }
        }

        let pairs: Vec<Vec<[Block; 2]>> = iter
            .map(|(rk, &v)| {
                rk.iter()
                    .enumerate()
                    .flat_map(|(k, &r)| {
                        let [r_high, r_low] = to_halves(r);
                        let [m_high, m_low] = to_halves(r + v * F::two_pow(k as u32));

                        [[r_high, m_high], [r_low, m_low]]
                    })
                    .collect()
            })
            .collect();

        Ok(pairs.into_iter().flatten().collect())
    }

    /// Returns the sender's shares, `-sum(r_k)` for every element.
    ///
    /// # Arguments
    ///
    /// * `masks` - The masks `r_k`.
    pub fn generate_output(&self, masks: &[F]) -> Result<Vec<F>, OLECoreError> {
        let bits = F::BIT_SIZE as usize;

        if masks.len() % bits != 0 {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of masks {} is not a multiple of {}.",
                masks.len(),
                bits,
            )));
        }

        Ok(masks
            .chunks_exact(bits)
            .map(|rk| -rk.iter().fold(F::zero(), |acc, &r| acc + r))
            .collect())
    }
}

impl<F: Field> Default for OTMulSender<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The receiver of the bit-serial OT-multiplication.
#[derive(Debug)]
pub struct OTMulReceiver<F>(PhantomData<F>);

impl<F: Field> OTMulReceiver<F> {
    /// Creates a new [`OTMulReceiver`].
    pub fn new() -> Self {
        let _: () = Check::<F>::FITS_TWO_BLOCKS;

        Self(PhantomData)
    }

    /// Returns the OT choices for the canonical bit encoding of the inputs.
    pub fn choices(&self, inputs: &[F]) -> Vec<bool> {
        let bits = F::BIT_SIZE as usize;

        inputs
            .iter()
            .flat_map(|b| {
                (0..bits).flat_map(move |k| {
                    let c = GetBit::<Lsb0>::get_bit(b, k);
                    [c, c]
                })
            })
            .collect()
    }

    /// Returns the OT choices for arbitrary bit encodings of the inputs.
    ///
    /// # Arguments
    ///
    /// * `bits` - The input bits, least significant bit first, `F::BIT_SIZE` bits per element.
    pub fn choices_from_bits(&self, bits: &[bool]) -> Result<Vec<bool>, OLECoreError> {
        if bits.len() % F::BIT_SIZE as usize != 0 {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of input bits {} is not a multiple of {}.",
                bits.len(),
                F::BIT_SIZE,
            )));
        }

        Ok(bits.iter().flat_map(|&c| [c, c]).collect())
    }

    /// Returns the receiver's shares from the received OT messages.
    ///
    /// # Arguments
    ///
    /// * `received` - The chosen OT messages, in payload order.
    pub fn generate_output(&self, received: &[Block]) -> Result<Vec<F>, OLECoreError> {
        let per_element = ot_count::<F>();

        if received.len() % per_element != 0 {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of OT messages {} is not a multiple of {}.",
                received.len(),
                per_element,
            )));
        }

        Ok(received
            .chunks_exact(per_element)
            .map(|chunk| {
                chunk
                    .chunks_exact(2)
                    .fold(F::zero(), |acc, m| acc + from_halves::<F>(m[0], m[1]))
            })
            .collect())
    }
}

impl<F: Field> Default for OTMulReceiver<F> {
    fn default() -> Self {
        Self::new()
    }
}
