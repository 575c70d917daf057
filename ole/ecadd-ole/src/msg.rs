//! Message types of the OLE protocols.

use ecadd_fields::Field;
use enum_try_as_inner::EnumTryAsInner;
use serde::{Deserialize, Serialize};

/// A message of the ROLEe protocol.
#[derive(Debug, Clone, EnumTryAsInner, Serialize, Deserialize)]
#[derive_err(Debug)]
pub enum ROLEMessage<F: Field> {
    /// Correlations and inputs sent by the provider.
    ///
    /// These are u_i and e_k.
    Correlation(Vec<F>, Vec<F>),
    /// Random inputs sent by the evaluator.
    ///
    /// These are d_k.
    EvaluatorInput(Vec<F>),
}

impl<F: Field> From<ROLEMessageError<F>> for std::io::Error {
    fn from(err: ROLEMessageError<F>) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string())
    }
}

/// A message of the OLEe derandomization.
#[derive(Debug, Clone, EnumTryAsInner, Serialize, Deserialize)]
#[derive_err(Debug)]
pub enum OLEMessage<F: Field> {
    /// Masked factors sent by the provider.
    ProviderDerand(Vec<F>),
    /// Masked inputs sent by the evaluator.
    EvaluatorDerand(Vec<F>),
}

impl<F: Field> From<OLEMessageError<F>> for std::io::Error {
    fn from(err: OLEMessageError<F>) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string())
    }
}
