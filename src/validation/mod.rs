//! Workspace validation
//!
//! Checks run in registration order and stop at the first ERROR. Each check
//! turns failures into an outcome instead of an error, so one broken piece
//! of the workspace never hides the report of the others.

use crate::workspace::SimWorkspace;

pub mod checks;

/// Severity of a check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

/// Result of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub severity: Severity,
    pub message: String,
}

impl CheckOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Ok,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// An independent workspace check
pub trait Check {
    /// Display name, e.g. "Find workspace"
    fn name(&self) -> &'static str;

    fn run(&self, workspace: &SimWorkspace) -> CheckOutcome;
}

/// Outcomes of a validation run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub outcomes: Vec<(&'static str, CheckOutcome)>,
}

impl ValidationReport {
    /// False if any executed check reported an ERROR
    pub fn passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, outcome)| outcome.severity != Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.severity == Severity::Warning)
            .count()
    }
}

/// Ordered registry of checks
#[derive(Default)]
pub struct Validator {
    checks: Vec<Box<dyn Check>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with every workspace check, in execution order
    pub fn standard() -> Self {
        let mut validator = Self::new();
        validator.register(checks::FindWorkspace);
        validator.register(checks::FindGazeboResources);
        validator.register(checks::WorldFile);
        validator.register(checks::XacroDependencies);
        validator.register(checks::MeshFiles);
        validator
    }

    pub fn register(&mut self, check: impl Check + 'static) {
        self.checks.push(Box::new(check));
    }

    /// Names of the registered checks
    #[cfg(test)]
    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run checks until the first ERROR, passing every outcome to `on_outcome`
    pub fn validate_all(
        &self,
        workspace: &SimWorkspace,
        mut on_outcome: impl FnMut(&str, &CheckOutcome),
    ) -> ValidationReport {
        let mut report = ValidationReport::default();

        for check in &self.checks {
            let outcome = check.run(workspace);
            on_outcome(check.name(), &outcome);
            let stop = outcome.severity == Severity::Error;
            report.outcomes.push((check.name(), outcome));
            if stop {
                break;
            }
        }

        report
    }
}
