//! Atmosphere errors.

use fc_core::FcError;
use thiserror::Error;

/// Result type for atmosphere operations.
pub type AtmosphereResult<T> = Result<T, AtmosphereError>;

/// Errors raised while building or evaluating an atmosphere model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtmosphereError {
    /// Altitude outside the table's valid domain under `RangePolicy::Fail`.
    #[error("Altitude {altitude_m} m outside table domain [{floor_m}, {ceiling_m}] m")]
    OutOfRangeAltitude {
        altitude_m: f64,
        floor_m: f64,
        ceiling_m: f64,
    },

    /// Table data rejected at construction.
    #[error("Invalid atmosphere table: {what}")]
    InvalidTable { what: &'static str },

    /// Non-physical input or result (non-finite altitude, non-positive temperature).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

impl From<FcError> for AtmosphereError {
    fn from(err: FcError) -> Self {
        match err {
            FcError::NonFinite { what, .. } | FcError::InvalidArg { what } => {
                AtmosphereError::NonPhysical { what }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AtmosphereError::OutOfRangeAltitude {
            altitude_m: 152_400.0,
            floor_m: 0.0,
            ceiling_m: 86_000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("152400"));
        assert!(msg.contains("86000"));
    }

    #[test]
    fn fc_error_maps_to_non_physical() {
        let err: AtmosphereError = FcError::NonFinite {
            what: "altitude",
            value: f64::NAN,
        }
        .into();
        assert_eq!(err, AtmosphereError::NonPhysical { what: "altitude" });
    }
}
