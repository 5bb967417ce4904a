//! ShiftFrequencyRequirement value type (§3).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationErrorKind};

/// Requires a worker to work at least one of `shift_types` within every
/// contiguous window of `max_periods_between` periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFrequencyRequirement {
    pub worker_id: String,
    pub shift_types: BTreeSet<String>,
    pub max_periods_between: usize,
}

impl ShiftFrequencyRequirement {
    pub fn new(
        worker_id: impl Into<String>,
        shift_types: BTreeSet<String>,
        max_periods_between: usize,
    ) -> Result<Self> {
        if shift_types.is_empty() {
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidFrequencyReq,
                "shift_types must be non-empty",
            ));
        }
        if max_periods_between < 1 {
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidFrequencyReq,
                "max_periods_between must be >= 1",
            ));
        }
        Ok(Self {
            worker_id: worker_id.into(),
            shift_types,
            max_periods_between,
        })
    }

    /// Window size is `max_periods_between` periods (§4.5.9 iterates windows
    /// of this size, 0-based, so that each fits entirely in the horizon).
    #[inline]
    pub fn window_size(&self) -> usize {
        self.max_periods_between
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_shift_types() {
        assert!(ShiftFrequencyRequirement::new("w1", BTreeSet::new(), 2).is_err());
    }

    #[test]
    fn rejects_zero_window() {
        let mut s = BTreeSet::new();
        s.insert("day".to_string());
        assert!(ShiftFrequencyRequirement::new("w1", s, 0).is_err());
    }
}
