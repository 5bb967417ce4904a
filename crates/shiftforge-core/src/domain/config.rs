//! ConstraintConfig value type (§3) and solver parameters (§6).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Per-constraint enablement, hard/soft classification, weight and
/// free-form parameters. Weight is ignored when `is_hard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    pub enabled: bool,
    pub is_hard: bool,
    pub weight: u64,
    #[serde(default)]
    pub parameters: BTreeMap<String, JsonValue>,
}

impl ConstraintConfig {
    pub fn new(enabled: bool, is_hard: bool, weight: u64) -> Self {
        Self {
            enabled,
            is_hard,
            weight,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn parameter_u64(&self, key: &str) -> Option<u64> {
        self.parameters.get(key).and_then(JsonValue::as_u64)
    }

    pub fn parameter_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(JsonValue::as_str)
    }

    pub fn parameter_str_list(&self, key: &str) -> Option<Vec<String>> {
        self.parameters.get(key).and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
    }
}

/// In-process solver parameters (§6). The core never reads these from a
/// file — config-file parsing is an explicit Non-goal (§1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    pub time_limit_seconds: u32,
    pub quick_solve_seconds: u32,
    pub num_search_workers: u32,
    pub log_search_progress: bool,
    pub optimality_tolerance: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            time_limit_seconds: 30,
            quick_solve_seconds: 0,
            num_search_workers: 1,
            log_search_progress: false,
            optimality_tolerance: 0.0,
        }
    }
}

impl SolverParams {
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_quick_solve(mut self, seconds: u32) -> Self {
        self.quick_solve_seconds = seconds;
        self
    }

    pub fn with_workers(mut self, workers: u32) -> Self {
        self.num_search_workers = workers.max(1);
        self
    }
}
