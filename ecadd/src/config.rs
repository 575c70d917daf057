use derive_builder::Builder;
use ecadd_common::Role;
use ecadd_fields::p256::P256;

use crate::circuit::triples_required;

/// The protocol used to invert a shared value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InversionMethod {
    /// Computes `x^(p-2)` with square-and-multiply, then checks `x * x^(p-2) = 1`.
    #[default]
    Exponentiation,
    /// Opens `x * r` for a jointly random `r` and returns `r * (x * r)^-1`.
    MaskedOpen,
}

/// Configuration of a session.
#[derive(Debug, Clone, Builder)]
pub struct SessionConfig {
    /// The protocol role.
    role: Role,
    /// The inversion protocol.
    #[builder(default)]
    inversion: InversionMethod,
    /// The number of triples to provision.
    #[builder(default, setter(strip_option))]
    triple_batch: Option<usize>,
}

impl SessionConfig {
    /// Creates a new builder for the session configuration.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Returns the protocol role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the inversion protocol.
    pub fn inversion(&self) -> InversionMethod {
        self.inversion
    }

    /// Returns the number of triples to provision.
    ///
    /// Defaults to exactly the number of triples one point addition consumes.
    pub fn triple_batch(&self) -> usize {
        self.triple_batch
            .unwrap_or_else(|| triples_required::<P256>(self.inversion))
    }
}
