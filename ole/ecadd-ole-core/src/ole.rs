//! OLE with errors (OLEe) from random OLE.
//!
//! The provider turns a random factor `a'` into its chosen factor `a` by sending `u = a + a'`,
//! the evaluator does the same with `v = b + b'`. Afterwards `y = a * b + x`.

use ecadd_fields::Field;
use std::marker::PhantomData;

use crate::OLECoreError;

/// A provider for OLE with errors.
#[derive(Debug)]
pub struct OLEeProvider<F>(PhantomData<F>);

impl<F: Field> OLEeProvider<F> {
    /// Creates a new [`OLEeProvider`].
    pub fn new() -> Self {
        OLEeProvider(PhantomData)
    }

    /// Masks the OLEe input with the ROLEe input.
    ///
    /// # Arguments
    ///
    /// * `ak_dash` - The ROLEe input factors.
    /// * `ak` - The chosen OLEe input.
    ///
    /// # Returns
    ///
    /// * `uk` - The masked chosen input factors, which will be sent to the evaluator.
    pub fn create_mask(&self, ak_dash: &[F], ak: &[F]) -> Result<Vec<F>, OLECoreError> {
        if ak_dash.len() != ak.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of ROLE inputs {} does not match number of OLE inputs {}.",
                ak_dash.len(),
                ak.len(),
            )));
        }

        Ok(ak_dash.iter().zip(ak).map(|(&d, &a)| a + d).collect())
    }

    /// Generates the OLEe output.
    ///
    /// # Arguments
    ///
    /// * `ak_dash` - The ROLEe input.
    /// * `xk_dash` - The ROLEe output.
    /// * `vk` - The masked chosen input factors from the evaluator.
    ///
    /// # Returns
    ///
    /// * `xk` - The OLEe output for the provider.
    pub fn generate_output(
        &self,
        ak_dash: &[F],
        xk_dash: &[F],
        vk: &[F],
    ) -> Result<Vec<F>, OLECoreError> {
        if ak_dash.len() != xk_dash.len() || xk_dash.len() != vk.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Length of field element vectors does not match. ak: {}, xk_dash: {}, vk: {}",
                ak_dash.len(),
                xk_dash.len(),
                vk.len(),
            )));
        }

        Ok(xk_dash
            .iter()
            .zip(ak_dash)
            .zip(vk)
            .map(|((&x, &a), &v)| x + a * v)
            .collect())
    }
}

impl<F: Field> Default for OLEeProvider<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// An evaluator for OLE with errors.
#[derive(Debug)]
pub struct OLEeEvaluator<F>(PhantomData<F>);

impl<F: Field> OLEeEvaluator<F> {
    /// Creates a new [`OLEeEvaluator`].
    pub fn new() -> Self {
        OLEeEvaluator(PhantomData)
    }

    /// Masks the OLEe input with the ROLEe input.
    ///
    /// # Arguments
    ///
    /// * `bk_dash` - The ROLEe input factors.
    /// * `bk` - The chosen OLEe input factors.
    ///
    /// # Returns
    ///
    /// * `vk` - The masked chosen input factors, which will be sent to the provider.
    pub fn create_mask(&self, bk_dash: &[F], bk: &[F]) -> Result<Vec<F>, OLECoreError> {
        if bk_dash.len() != bk.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Number of ROLE inputs {} does not match number of OLE inputs {}.",
                bk_dash.len(),
                bk.len(),
            )));
        }

        Ok(bk_dash.iter().zip(bk).map(|(&d, &b)| b + d).collect())
    }

    /// Generates the OLEe output.
    ///
    /// # Arguments
    ///
    /// * `bk` - The OLEe input factors.
    /// * `yk_dash` - The ROLEe output.
    /// * `uk` - The masked chosen input factors from the provider.
    ///
    /// # Returns
    ///
    /// * `yk` - The OLEe output for the evaluator.
    pub fn generate_output(
        &self,
        bk: &[F],
        yk_dash: &[F],
        uk: &[F],
    ) -> Result<Vec<F>, OLECoreError> {
        if bk.len() != yk_dash.len() || yk_dash.len() != uk.len() {
            return Err(OLECoreError::LengthMismatch(format!(
                "Length of field element vectors does not match. bk: {}, yk_dash: {}, uk: {}",
                bk.len(),
                yk_dash.len(),
                uk.len(),
            )));
        }

        Ok(yk_dash
            .iter()
            .zip(bk)
            .zip(uk)
            .map(|((&y, &b), &u)| y + b * u)
            .collect())
    }
}

impl<F: Field> Default for OLEeEvaluator<F> {
    fn default() -> Self {
        Self::new()
    }
}
