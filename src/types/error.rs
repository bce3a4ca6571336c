use thiserror::Error;

/// Validation failures raised while compiling a listener rule.
///
/// Every variant names the rule that was rejected. A rule that fails with any
/// of these is never committed to the listener's rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid match in rule '{rule}': {reason}")]
    InvalidMatchSpec { rule: String, reason: String },

    #[error("rule '{rule}' forwards to multiple target groups; target '{target}' needs a weight")]
    MissingWeight { rule: String, target: String },

    #[error("rule '{rule}' forwards to no target groups")]
    EmptyAction { rule: String },

    #[error("priority {priority} of rule '{rule}' is already in use on this listener")]
    DuplicatePriority { rule: String, priority: u32 },
}

impl RuleError {
    pub(crate) fn invalid_match(rule: &str, reason: impl Into<String>) -> Self {
        RuleError::InvalidMatchSpec {
            rule: rule.to_owned(),
            reason: reason.into(),
        }
    }

    /// The name of the rule this error was raised for.
    #[must_use]
    pub fn rule(&self) -> &str {
        match self {
            RuleError::InvalidMatchSpec { rule, .. }
            | RuleError::MissingWeight { rule, .. }
            | RuleError::EmptyAction { rule }
            | RuleError::DuplicatePriority { rule, .. } => rule,
        }
    }
}
