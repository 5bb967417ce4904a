//! Worker value type (§3).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{CoreError, Result, ValidationErrorKind};

/// An immutable worker eligible for assignment.
///
/// Constructed once via [`Worker::new`] / [`WorkerBuilder`]; never mutated
/// afterwards. Identity is the stable `id` string, not the struct's address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub worker_type: String,
    pub fte: f64,
    pub is_active: bool,
    #[serde(default)]
    pub restricted_shifts: BTreeSet<String>,
    #[serde(default)]
    pub preferred_shifts: BTreeSet<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, JsonValue>,
}

impl Worker {
    /// Builds a worker, enforcing the `restricted_shifts ∩ preferred_shifts = ∅`
    /// invariant from §3. Fails with `ValidationError(InvalidWorker)` otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        worker_type: impl Into<String>,
        fte: f64,
        is_active: bool,
        restricted_shifts: BTreeSet<String>,
        preferred_shifts: BTreeSet<String>,
        attributes: BTreeMap<String, JsonValue>,
    ) -> Result<Self> {
        if !(0.0 < fte && fte <= 1.0) {
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidWorker,
                format!("worker {}: fte {fte} is not in (0,1]", id.into()),
            ));
        }
        let id = id.into();
        if !restricted_shifts.is_disjoint(&preferred_shifts) {
            let overlap: Vec<_> = restricted_shifts
                .intersection(&preferred_shifts)
                .cloned()
                .collect();
            return Err(CoreError::validation(
                ValidationErrorKind::InvalidWorker,
                format!(
                    "worker {id}: restricted_shifts and preferred_shifts overlap on {overlap:?}"
                ),
            ));
        }
        Ok(Self {
            id,
            name: name.into(),
            worker_type: worker_type.into(),
            fte,
            is_active,
            restricted_shifts,
            preferred_shifts,
            attributes,
        })
    }

    /// Builder entry point in the idiom of the quickstart's `Employee::new().with_*`.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> WorkerBuilder {
        WorkerBuilder::new(id, name)
    }

    #[inline]
    pub fn is_restricted_from(&self, shift_type_id: &str) -> bool {
        self.restricted_shifts.contains(shift_type_id)
    }
}

/// Fluent builder for [`Worker`]; validates on [`WorkerBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct WorkerBuilder {
    id: String,
    name: String,
    worker_type: String,
    fte: f64,
    is_active: bool,
    restricted_shifts: BTreeSet<String>,
    preferred_shifts: BTreeSet<String>,
    attributes: BTreeMap<String, JsonValue>,
}

impl WorkerBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            worker_type: String::new(),
            fte: 1.0,
            is_active: true,
            restricted_shifts: BTreeSet::new(),
            preferred_shifts: BTreeSet::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn worker_type(mut self, worker_type: impl Into<String>) -> Self {
        self.worker_type = worker_type.into();
        self
    }

    pub fn fte(mut self, fte: f64) -> Self {
        self.fte = fte;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn restricted_shift(mut self, shift_type_id: impl Into<String>) -> Self {
        self.restricted_shifts.insert(shift_type_id.into());
        self
    }

    pub fn preferred_shift(mut self, shift_type_id: impl Into<String>) -> Self {
        self.preferred_shifts.insert(shift_type_id.into());
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Result<Worker> {
        Worker::new(
            self.id,
            self.name,
            self.worker_type,
            self.fte,
            self.is_active,
            self.restricted_shifts,
            self.preferred_shifts,
            self.attributes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_overlapping_restricted_and_preferred() {
        let err = Worker::builder("w1", "Alice")
            .restricted_shift("night")
            .preferred_shift("night")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                kind: ValidationErrorKind::InvalidWorker,
                ..
            }
        ));
    }

    #[test]
    fn rejects_fte_out_of_range() {
        let err = Worker::builder("w1", "Alice").fte(0.0).build().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation {
                kind: ValidationErrorKind::InvalidWorker,
                ..
            }
        ));
    }

    #[test]
    fn accepts_disjoint_sets() {
        let w = Worker::builder("w1", "Alice")
            .restricted_shift("night")
            .preferred_shift("day")
            .build()
            .unwrap();
        assert!(w.is_restricted_from("night"));
        assert!(!w.is_restricted_from("day"));
    }
}
