//! SchedulingRequest value type (§3).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationErrorKind};

/// A worker's request to work (or not work) a given shift type in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    pub worker_id: String,
    pub shift_type_id: String,
    pub period_index: usize,
    pub is_positive: bool,
    pub priority: u32,
}

impl SchedulingRequest {
    /// Priority is an integer >= 1; 0 is rejected per §9's Open Question resolution.
    pub fn new(
        worker_id: impl Into<String>,
        shift_type_id: impl Into<String>,
        period_index: usize,
        is_positive: bool,
        priority: u32,
    ) -> Result<Self> {
        if priority == 0 {
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidRequest,
                "priority must be >= 1",
            ));
        }
        Ok(Self {
            worker_id: worker_id.into(),
            shift_type_id: shift_type_id.into(),
            period_index,
            is_positive,
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_priority() {
        assert!(SchedulingRequest::new("w1", "day", 0, true, 0).is_err());
    }

    #[test]
    fn accepts_priority_one() {
        assert!(SchedulingRequest::new("w1", "day", 0, true, 1).is_ok());
    }
}
