//! Random OLE with errors (ROLEe) from random OT.
//!
//! For every element the provider and evaluator share `F::BIT_SIZE` random OTs. The OT labels are
//! expanded into field elements with [`expand_to_field`](crate::expand_to_field).

use ecadd_core::Label;
use ecadd_fields::Field;
use rand::thread_rng;
use std::marker::PhantomData;

use crate::{expand_to_field, OLECoreError};

/// A ROLEe provider.
#[derive(Debug)]
pub struct ROLEeProvider<F>(PhantomData<F>);

impl<F: Field> ROLEeProvider<F> {
    /// Creates a new [`ROLEeProvider`].
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Randomly samples the field elements `c` and `e` `count`-times.
    ///
    /// # Arguments
    ///
    /// * `count` - The batch size, i.e. how many `c`s and `e`s to sample.
    pub fn sample_c_and_e(&self, count: usize) -> (Vec<F>, Vec<F>) {
        let mut rng = thread_rng();

        let ck = (0..count).map(|_| F::rand(&mut rng)).collect();
        let ek = (0..count).map(|_| F::rand(&mut rng)).collect();

        (ck, ek)
    }

    /// Creates the correlation which masks the provider's input `ck`.
    ///
    /// # Arguments
    ///
    /// * `ti01` - The random OT messages, which the provider has sent to the evaluator.
    /// * `ck` - The provider's input to the random OLEe.
    ///
    /// # Returns
    ///
    /// * `ui` - The correlations, which will be sent to the evaluator.
    /// * `t0i` - The expanded 0 choice messages of the random OT.
    pub fn create_correlation(
        &self,
        ti01: &[[Label; 2]],
        ck: &[F],
    ) -> Result<(Vec<F>, Vec<F>), OLECoreError> {
        if ck.len() * F::BIT_SIZE as usize != ti01.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of field elements {} does not match number of OT messages {}.",
                ck.len(),
                ti01.len()
            )));
        }

        let (ui, t0i): (Vec<F>, Vec<F>) = ti01
            .chunks(F::BIT_SIZE as usize)
            .zip(ck)
            .flat_map(|(chunk, &c)| {
                chunk.iter().map(move |&[t0, t1]| {
                    let t0: F = expand_to_field(t0);
                    let t1: F = expand_to_field(t1);
                    (t0 - t1 + c, t0)
                })
            })
            .unzip();

        Ok((ui, t0i))
    }

    /// Generates the provider's ROLEe input and output.
    ///
    /// # Arguments
    ///
    /// * `t0i` - The expanded 0 choice messages of the random OT.
    /// * `ck` - The provider's input to the random OLEe.
    /// * `dk` - The evaluator's input to the random OLEe.
    /// * `ek` - The provider's input to the random OLEe.
    ///
    /// # Returns
    ///
    /// * `ak` - The provider's final ROLEe input factor.
    /// * `xk` - The provider's final ROLEe output summand.
    pub fn generate_output(
        &self,
        t0i: &[F],
        ck: &[F],
        dk: &[F],
        ek: &[F],
    ) -> Result<(Vec<F>, Vec<F>), OLECoreError> {
        if ck.len() * F::BIT_SIZE as usize != t0i.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of field elements {} does not match number of OT messages {}.",
                ck.len(),
                t0i.len(),
            )));
        }

        if ck.len() != dk.len() || dk.len() != ek.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Vectors of field elements have unequal length: ck: {}, dk: {}, ek: {}.",
                ck.len(),
                dk.len(),
                ek.len(),
            )));
        }

        let t0k = compose::<F>(t0i);
        let ak: Vec<F> = ck.iter().zip(dk).map(|(&c, &d)| c + d).collect();

        let xk: Vec<F> = t0k
            .iter()
            .zip(&ak)
            .zip(ek)
            .map(|((&t, &a), &e)| t - a * e)
            .collect();

        Ok((ak, xk))
    }
}

impl<F: Field> Default for ROLEeProvider<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A ROLEe evaluator.
#[derive(Debug)]
pub struct ROLEeEvaluator<F>(PhantomData<F>);

impl<F: Field> ROLEeEvaluator<F> {
    /// Creates a new [`ROLEeEvaluator`].
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Randomly samples the field elements `d` `count`-times.
    pub fn sample_d(&self, count: usize) -> Vec<F> {
        let mut rng = thread_rng();

        (0..count).map(|_| F::rand(&mut rng)).collect()
    }

    /// Generates the evaluator's ROLEe input and output.
    ///
    /// # Arguments
    ///
    /// * `fi` - The random OT choices.
    /// * `tfi` - The chosen random OT messages.
    /// * `ui` - The correlations from the provider.
    /// * `dk` - The evaluator's input to the random OLEe.
    /// * `ek` - The provider's input to the random OLEe.
    ///
    /// # Returns
    ///
    /// * `bk` - The evaluator's final ROLEe input.
    /// * `yk` - The evaluator's final ROLEe output.
    pub fn generate_output(
        &self,
        fi: &[bool],
        tfi: &[Label],
        ui: &[F],
        dk: &[F],
        ek: &[F],
    ) -> Result<(Vec<F>, Vec<F>), OLECoreError> {
        let bits = F::BIT_SIZE as usize;

        if fi.len() != tfi.len() || tfi.len() != ui.len() || ui.len() != dk.len() * bits {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of OT messages does not match: fi: {}, tfi: {}, ui: {}, expected: {}.",
                fi.len(),
                tfi.len(),
                ui.len(),
                dk.len() * bits,
            )));
        }

        if dk.len() != ek.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Vectors of field elements have unequal length: dk: {}, ek: {}.",
                dk.len(),
                ek.len(),
            )));
        }

        let bk: Vec<F> = fi
            .chunks(bits)
            .zip(ek)
            .map(|(f, &e)| F::from_lsb0_iter(f.iter().copied()) + e)
            .collect();

        let yk: Vec<F> = fi
            .chunks(bits)
            .zip(tfi.chunks(bits))
            .zip(ui.chunks(bits))
            .zip(dk)
            .map(|(((f, t), u), &d)| {
                f.iter()
                    .zip(t)
                    .zip(u)
                    .enumerate()
                    .fold(F::zero(), |acc, (i, ((&f, &t), &u))| {
                        let t: F = expand_to_field(t);
                        let summand = if f { u + d + t } else { t };
                        acc + F::two_pow(i as u32) * summand
                    })
            })
            .collect();

        Ok((bk, yk))
    }
}

impl<F: Field> Default for ROLEeEvaluator<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Composes `F::BIT_SIZE` consecutive elements `t_i` into `sum(2^i * t_i)`.
fn compose<F: Field>(ti: &[F]) -> Vec<F> {
    ti.chunks(F::BIT_SIZE as usize)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(F::zero(), |acc, (i, &t)| acc + F::two_pow(i as u32) * t)
        })
        .collect()
}

/// Returns the number of random OTs needed for `count` ROLEs.
pub fn rot_count<F: Field>(count: usize) -> usize {
    count * F::BIT_SIZE as usize
}
