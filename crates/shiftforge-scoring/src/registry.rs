//! Constraint registry (§4.7): a name-keyed catalogue of every pluggable
//! constraint, plus each one's `{default_enabled, default_hard,
//! default_weight, parameter_schema}`. Built fresh per call — there is
//! nothing here that benefits from being a lazily-initialized global, and a
//! plain constructor keeps the registry itself free of any configuration
//! the model doesn't also see explicitly. Constraint names are never
//! parsed for their semantics, only used as the registry's lookup key (§9).
//! The registry is the single source of defaults; constraints themselves
//! never override them in their own constructors.

use indexmap::IndexMap;

use shiftforge_core::{
    ConfigErrorKind, ConstraintConfig, CoreError, Result, SchedulingInput, Solver, VariableBuilder,
};

use crate::constraints::{
    AvailabilityConstraint, Constraint, Contribution, FairnessConstraint, FrequencyConstraint,
    MaxAbsenceConstraint, RequestConstraint, SequenceConstraint, ShiftFrequencyConstraint,
};

/// One registry entry: the constraint implementation plus the defaults a
/// caller's explicit `ConstraintConfig` may override.
struct RegistryEntry {
    constraint: Box<dyn Constraint>,
    default_enabled: bool,
    default_hard: bool,
    default_weight: u64,
    /// Names of the parameters this constraint reads, for introspection by
    /// callers building a config UI. Never validated against at apply time.
    parameter_schema: &'static [&'static str],
}

/// The eight pluggable constraints from §4.5, keyed by their registry name.
pub struct Registry {
    entries: IndexMap<&'static str, RegistryEntry>,
}

impl Registry {
    /// The standard registry shipped with shiftforge: one entry per
    /// pluggable constraint in §4.5 (coverage and worker-restriction are
    /// structural and are not registered — see
    /// [`crate::apply_structural_constraints`]).
    pub fn standard() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(
            "availability",
            RegistryEntry {
                constraint: Box::new(AvailabilityConstraint),
                default_enabled: false,
                default_hard: true,
                default_weight: 0,
                parameter_schema: &[],
            },
        );
        entries.insert(
            "fairness",
            RegistryEntry {
                constraint: Box::new(FairnessConstraint),
                default_enabled: false,
                default_hard: false,
                default_weight: 1,
                parameter_schema: &["categories", "max_spread"],
            },
        );
        entries.insert(
            "frequency",
            RegistryEntry {
                constraint: Box::new(FrequencyConstraint),
                default_enabled: false,
                default_hard: false,
                default_weight: 1,
                parameter_schema: &["default_max_periods_between"],
            },
        );
        entries.insert(
            "request",
            RegistryEntry {
                constraint: Box::new(RequestConstraint),
                default_enabled: false,
                default_hard: false,
                default_weight: 1,
                parameter_schema: &[],
            },
        );
        entries.insert(
            "sequence",
            RegistryEntry {
                constraint: Box::new(SequenceConstraint),
                default_enabled: false,
                default_hard: false,
                default_weight: 1,
                parameter_schema: &["max_consecutive", "categories"],
            },
        );
        entries.insert(
            "max_absence",
            RegistryEntry {
                constraint: Box::new(MaxAbsenceConstraint),
                default_enabled: false,
                default_hard: false,
                default_weight: 1,
                parameter_schema: &["max_periods_absent", "shift_types"],
            },
        );
        entries.insert(
            "shift_frequency",
            RegistryEntry {
                constraint: Box::new(ShiftFrequencyConstraint),
                default_enabled: false,
                default_hard: false,
                default_weight: 1,
                parameter_schema: &[],
            },
        );
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Constraint> {
        self.entries.get(name).map(|e| e.constraint.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// The parameter names `name` reads, or `None` if `name` is not
    /// registered.
    pub fn parameter_schema(&self, name: &str) -> Option<&'static [&'static str]> {
        self.entries.get(name).map(|e| e.parameter_schema)
    }

    fn default_config(entry: &RegistryEntry) -> ConstraintConfig {
        ConstraintConfig::new(entry.default_enabled, entry.default_hard, entry.default_weight)
    }

    /// Applies every constraint in registered order. For each, an explicit
    /// config named in `input.constraint_configs` overrides the registry's
    /// defaults entirely; otherwise the registry default applies.
    ///
    /// Request (§4.5.6) carries one auto-enable exception: if the caller
    /// supplied no explicit config for it and at least one
    /// [`SchedulingRequest`](shiftforge_core::SchedulingRequest) exists, it
    /// is enabled with its default config even though `default_enabled` is
    /// `false`. An explicit `enabled = false` is still honored.
    pub fn apply_all(
        &self,
        solver: &mut dyn Solver,
        vars: &VariableBuilder,
        input: &SchedulingInput,
    ) -> Result<Vec<(&'static str, Vec<Contribution>)>> {
        for name in input.constraint_configs.keys() {
            if !self.entries.contains_key(name.as_str()) {
                return Err(CoreError::config(
                    ConfigErrorKind::UnknownConstraint,
                    format!("no registered constraint named '{name}'"),
                ));
            }
        }

        let mut results = Vec::new();
        for (name, entry) in &self.entries {
            let explicit = input.constraint_configs.get(*name);
            let config = match explicit {
                Some(config) => config.clone(),
                None if *name == "request" && !input.requests.is_empty() => Self::default_config(entry),
                None => Self::default_config(entry),
            };
            if !config.enabled {
                continue;
            }
            let contributions = entry.constraint.apply(solver, vars, input, &config)?;
            results.push((*name, contributions));
        }
        Ok(results)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
