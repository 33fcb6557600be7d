// gridloc_core/src/error.rs

use thiserror::Error;

/// Every way a localization operation can refuse its inputs.
///
/// Errors are raised at the boundary of the operation whose precondition or
/// postcondition would be violated. Nothing in the core retries or recovers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocalizationError {
    /// The color map is empty or ragged, or a distribution does not match it.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A scalar parameter or input sequence is outside its allowed domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The normalizer of a sensor update collapsed to zero (or is not finite).
    /// `step` is filled in by the estimator that was driving the update.
    #[error("{}", degenerate_message(.step, .normalizer))]
    DegenerateDistribution {
        step: Option<usize>,
        normalizer: f64,
    },
}

fn degenerate_message(step: &Option<usize>, normalizer: &f64) -> String {
    match step {
        Some(step) => format!(
            "degenerate distribution at step {step}: normalizer is {normalizer}"
        ),
        None => format!("degenerate distribution: normalizer is {normalizer}"),
    }
}

impl LocalizationError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Attaches the index of the failing step to a degenerate-distribution error.
    /// Other variants pass through unchanged.
    pub fn at_step(self, step: usize) -> Self {
        match self {
            Self::DegenerateDistribution { normalizer, .. } => Self::DegenerateDistribution {
                step: Some(step),
                normalizer,
            },
            other => other,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateDistribution { .. })
    }
}

pub type Result<T> = std::result::Result<T, LocalizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_step_only_annotates_degenerate_errors() {
        let err = LocalizationError::DegenerateDistribution {
            step: None,
            normalizer: 0.0,
        }
        .at_step(3);
        assert_eq!(
            err,
            LocalizationError::DegenerateDistribution {
                step: Some(3),
                normalizer: 0.0
            }
        );
        assert!(err.to_string().contains("step 3"));

        let shape = LocalizationError::InvalidShape("empty".into()).at_step(3);
        assert_eq!(shape, LocalizationError::InvalidShape("empty".into()));
    }

    #[test]
    fn test_parameter_message_names_the_parameter() {
        let err = LocalizationError::parameter("p_move", "must lie in [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid parameter `p_move`: must lie in [0, 1], got 1.5"
        );
    }
}
