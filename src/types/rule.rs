use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionSpec, TargetReference};
use super::matcher::{HeaderMatchSpec, MatchCriteria, MatchSpec, PathMatchSpec};

/// A rule as the caller describes it, before validation.
///
/// Can be built directly, deserialized from the camelCase JSON input shape,
/// or assembled through [`ListenerRuleCompiler::rule()`](crate::ListenerRuleCompiler::rule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    pub name: String,
    pub priority: u32,
    pub action: ActionSpec,
    #[serde(flatten)]
    pub matches: MatchSpec,
}

impl RuleSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, priority: u32, action: impl Into<ActionSpec>) -> Self {
        Self {
            name: name.into(),
            priority,
            action: action.into(),
            matches: MatchSpec::default(),
        }
    }

    #[must_use]
    pub fn method_match(mut self, method: impl Into<String>) -> Self {
        self.matches.method_match = Some(method.into());
        self
    }

    #[must_use]
    pub fn path_match(mut self, path: PathMatchSpec) -> Self {
        self.matches.path_match = Some(path);
        self
    }

    #[must_use]
    pub fn header_matches(mut self, headers: Vec<HeaderMatchSpec>) -> Self {
        self.matches.header_matches = Some(headers);
        self
    }
}

/// Intermediate builder passed to the closure of
/// [`ListenerRuleCompiler::rule()`](crate::ListenerRuleCompiler::rule).
///
/// If no action is given the rule is rejected with
/// [`RuleError::EmptyAction`](crate::RuleError::EmptyAction).
#[derive(Debug, Default)]
pub struct RuleBuilder {
    action: Option<ActionSpec>,
    matches: MatchSpec,
}

impl RuleBuilder {
    /// Match requests using the given HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.matches.method_match = Some(method.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: PathMatchSpec) -> Self {
        self.matches.path_match = Some(path);
        self
    }

    #[must_use]
    pub fn path_exact(self, value: impl Into<String>) -> Self {
        self.path(PathMatchSpec::exact(value))
    }

    #[must_use]
    pub fn path_prefix(self, value: impl Into<String>) -> Self {
        self.path(PathMatchSpec::prefix(value))
    }

    /// Add a header match. Repeated calls accumulate.
    #[must_use]
    pub fn header(mut self, header: HeaderMatchSpec) -> Self {
        self.matches
            .header_matches
            .get_or_insert_with(Vec::new)
            .push(header);
        self
    }

    /// Respond with a fixed status code, replacing any earlier action.
    #[must_use]
    pub fn respond(mut self, status_code: u32) -> Self {
        self.action = Some(ActionSpec::FixedResponse(status_code));
        self
    }

    /// Forward to a target group without an explicit weight.
    ///
    /// Targets accumulate across calls. A fixed response set earlier is
    /// replaced.
    #[must_use]
    pub fn forward(self, target: impl Into<String>) -> Self {
        self.push_target(TargetReference::new(target))
    }

    /// Forward to a target group with an explicit weight. Accumulates and
    /// replaces like [`forward()`](Self::forward).
    #[must_use]
    pub fn forward_weighted(self, target: impl Into<String>, weight: u32) -> Self {
        self.push_target(TargetReference::weighted(target, weight))
    }

    fn push_target(mut self, target: TargetReference) -> Self {
        if let Some(ActionSpec::Forward(targets)) = &mut self.action {
            targets.push(target);
        } else {
            self.action = Some(ActionSpec::Forward(vec![target]));
        }
        self
    }

    pub(crate) fn into_spec(self, name: &str, priority: u32) -> RuleSpec {
        RuleSpec {
            name: name.to_owned(),
            priority,
            action: self
                .action
                .unwrap_or_else(|| ActionSpec::Forward(Vec::new())),
            matches: self.matches,
        }
    }
}

/// A validated rule. Immutable once committed to a listener's rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) priority: u32,
    pub(crate) action: Action,
    pub(crate) criteria: MatchCriteria,
}

impl Rule {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    #[must_use]
    pub fn criteria(&self) -> &MatchCriteria {
        &self.criteria
    }

    /// The resource definition handed to the provisioning layer for this rule.
    #[must_use]
    pub fn definition<'a>(&'a self, listener_identifier: &'a str) -> RuleDefinition<'a> {
        RuleDefinition {
            name: &self.name,
            listener_identifier,
            priority: self.priority,
            action: &self.action,
            matcher: HttpMatch {
                http_match: &self.criteria,
            },
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (priority {}): {} -> {}",
            self.name, self.priority, self.criteria, self.action
        )
    }
}

/// Serializable view of a [`Rule`] in the provisioning layer's shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition<'a> {
    pub name: &'a str,
    pub listener_identifier: &'a str,
    pub priority: u32,
    pub action: &'a Action,
    #[serde(rename = "match")]
    pub matcher: HttpMatch<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpMatch<'a> {
    pub http_match: &'a MatchCriteria,
}
