//! Error types for layout configuration and pick resolution.
//!
//! Nothing in hierarchy construction or routing returns these as a hard
//! failure: a [`ResolveError`] is attached to the individual pick request it
//! describes, and a [`ConfigError`] is only produced when a caller loads or
//! validates configuration.

use crate::record::RecordId;

/// Invalid layout or routing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A length or time parameter that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A weight or duration that must not be negative is.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// A count parameter is zero.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    /// The configuration document could not be parsed.
    #[error("invalid layout document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), Self> {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonPositive { field, value })
        }
    }

    pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), Self> {
        if value >= 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }
}

/// Why a pick request could not be resolved to a positioned bin.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The source location is not part of the tree and no other bin holds the product.
    #[error("location {0} is not in this warehouse and no bin holds the product")]
    UnknownLocation(RecordId),

    /// The source location exists but is not a positioned bin, and no other bin holds the product.
    #[error("location {0} is not a positioned bin and no bin holds the product")]
    NoPositionedBin(RecordId),

    /// The requested quantity is zero or negative.
    #[error("requested quantity {0} is not positive")]
    NonPositiveQuantity(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(ConfigError::require_positive("bay_width", 1.0).is_ok());
        assert!(ConfigError::require_positive("bay_width", 0.0).is_err());
        assert!(ConfigError::require_positive("bay_width", f64::NAN).is_err());
    }

    #[test]
    fn test_messages() {
        let err = ConfigError::NonPositive { field: "aisle_width", value: -1.0 };
        assert!(err.to_string().contains("aisle_width"));

        let err = ResolveError::UnknownLocation(42);
        assert!(err.to_string().contains("42"));
    }
}
