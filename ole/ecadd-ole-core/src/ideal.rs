//! Ideal functionalities for (random) OLE.

use ecadd_fields::Field;
use rand::thread_rng;
use std::marker::PhantomData;

use crate::OLECoreError;

/// The ROLE functionality.
#[derive(Debug)]
pub struct ROLEFunctionality<F>(PhantomData<F>);

impl<F: Field> ROLEFunctionality<F> {
    /// Creates a new [`ROLEFunctionality`].
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Generates `count` random OLEs.
    ///
    /// Returns the provider's output `(ak, xk)` and the evaluator's output `(bk, yk)` with
    /// `yk = ak * bk + xk`.
    #[allow(clippy::type_complexity)]
    pub fn generate(&self, count: usize) -> ((Vec<F>, Vec<F>), (Vec<F>, Vec<F>)) {
        let mut rng = thread_rng();

        let ak: Vec<F> = (0..count).map(|_| F::rand(&mut rng)).collect();
        let bk: Vec<F> = (0..count).map(|_| F::rand(&mut rng)).collect();
        let xk: Vec<F> = (0..count).map(|_| F::rand(&mut rng)).collect();
        let yk: Vec<F> = xk
            .iter()
            .zip(&ak)
            .zip(&bk)
            .map(|((&x, &a), &b)| a * b + x)
            .collect();

        ((ak, xk), (bk, yk))
    }
}

impl<F: Field> Default for ROLEFunctionality<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The OLE functionality.
#[derive(Debug)]
pub struct OLEFunctionality<F>(PhantomData<F>);

impl<F: Field> OLEFunctionality<F> {
    /// Creates a new [`OLEFunctionality`].
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Samples the provider's random offsets `xk`.
    pub fn offsets(&self, count: usize) -> Vec<F> {
        let mut rng = thread_rng();

        (0..count).map(|_| F::rand(&mut rng)).collect()
    }

    /// Evaluates `yk = ak * bk + xk`.
    ///
    /// # Arguments
    ///
    /// * `ak` - The provider's factors.
    /// * `xk` - The provider's offsets.
    /// * `bk` - The evaluator's inputs.
    pub fn evaluate(&self, ak: &[F], xk: &[F], bk: &[F]) -> Result<Vec<F>, OLECoreError> {
        if ak.len() != xk.len() || xk.len() != bk.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Vectors of field elements have unequal length: ak: {}, xk: {}, bk: {}.",
                ak.len(),
                xk.len(),
                bk.len(),
            )));
        }

        Ok(ak
            .iter()
            .zip(xk)
            .zip(bk)
            .map(|((&a, &x), &b)| a * b + x)
            .collect())
    }
}

impl<F: Field> Default for OLEFunctionality<F> {
    fn default() -> Self {
        Self::new()
    }
}
