use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionSpec};
use super::error::RuleError;
use super::rule::{Rule, RuleBuilder, RuleDefinition, RuleSpec};
use super::ruleset::RuleSet;

/// Protocol a listener accepts traffic on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Port used when a listener does not name one.
    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "HTTP"),
            Protocol::Https => write!(f, "HTTPS"),
        }
    }
}

/// The identity and settings of a listener on a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    pub name: String,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub service_identifier: String,
    /// Taken when no rule matches.
    pub default_action: ActionSpec,
}

impl Listener {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        protocol: Protocol,
        service_identifier: impl Into<String>,
        default_action: impl Into<ActionSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            protocol,
            port: None,
            service_identifier: service_identifier.into(),
            default_action: default_action.into(),
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// The explicit port, or the protocol's default.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.protocol.default_port())
    }

    /// Identifier rules use to refer to this listener.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.service_identifier, self.name)
    }
}

/// Owns the rule set of one listener and compiles rules into it.
///
/// Rules may be added at any time; each is validated against the rules
/// already committed and is either committed whole or rejected without any
/// change to the rule set. There is no removal.
///
/// # Example
///
/// ```
/// use lattice_rules::{HeaderMatchSpec, Listener, ListenerRuleCompiler, Protocol};
///
/// let listener = Listener::new("api", Protocol::Https, "svc-0123", 404);
/// let mut compiler = ListenerRuleCompiler::new(listener).unwrap();
///
/// compiler
///     .rule("service-one", 100, |r| r.path_exact("/serviceOne").forward("tg-one"))
///     .unwrap();
/// compiler
///     .rule("canary", 200, |r| {
///         r.header(HeaderMatchSpec::exact("x-canary", "1"))
///             .forward_weighted("tg-stable", 90)
///             .forward_weighted("tg-canary", 10)
///     })
///     .unwrap();
///
/// assert_eq!(compiler.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ListenerRuleCompiler {
    listener: Listener,
    identifier: String,
    default_action: Action,
    rules: RuleSet,
}

impl ListenerRuleCompiler {
    /// Create a compiler with an empty rule set for `listener`.
    ///
    /// # Errors
    ///
    /// The listener's default action follows the same rules as a rule
    /// action, so this fails with [`RuleError::EmptyAction`] or
    /// [`RuleError::MissingWeight`] when it is malformed.
    pub fn new(listener: Listener) -> Result<Self, RuleError> {
        let default_action = crate::compile::resolve_action(
            &format!("{} default action", listener.name),
            &listener.default_action,
        )?;
        let identifier = listener.identifier();
        Ok(Self {
            listener,
            identifier,
            default_action,
            rules: RuleSet::new(),
        })
    }

    /// Validate `spec` and commit it to the rule set.
    ///
    /// Checks run in order: priority uniqueness, action, match. The first
    /// failure is returned and the rule set is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::DuplicatePriority`], [`RuleError::MissingWeight`],
    /// [`RuleError::EmptyAction`] or [`RuleError::InvalidMatchSpec`].
    pub fn add_rule(&mut self, spec: RuleSpec) -> Result<&Rule, RuleError> {
        match crate::compile::compile_rule(&self.rules, &spec) {
            Ok(rule) => {
                tracing::debug!(
                    listener = %self.identifier,
                    rule = %rule.name,
                    priority = rule.priority,
                    "rule committed"
                );
                Ok(self.rules.commit(rule))
            }
            Err(err) => {
                tracing::debug!(
                    listener = %self.identifier,
                    rule = %spec.name,
                    priority = spec.priority,
                    error = %err,
                    "rule rejected"
                );
                Err(err)
            }
        }
    }

    /// Define a rule through a builder closure and add it.
    ///
    /// # Errors
    ///
    /// Same as [`add_rule()`](Self::add_rule). A closure that sets no action
    /// yields [`RuleError::EmptyAction`].
    pub fn rule(
        &mut self,
        name: &str,
        priority: u32,
        f: impl FnOnce(RuleBuilder) -> RuleBuilder,
    ) -> Result<&Rule, RuleError> {
        let spec = f(RuleBuilder::default()).into_spec(name, priority);
        self.add_rule(spec)
    }

    #[must_use]
    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn default_action(&self) -> &Action {
        &self.default_action
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The listener and its rules in the provisioning layer's shape.
    #[must_use]
    pub fn definition(&self) -> ListenerDefinition<'_> {
        ListenerDefinition {
            name: &self.listener.name,
            protocol: self.listener.protocol,
            port: self.listener.port(),
            service_identifier: &self.listener.service_identifier,
            default_action: &self.default_action,
            rules: self
                .rules
                .iter()
                .map(|r| r.definition(&self.identifier))
                .collect(),
        }
    }

    /// Render [`definition()`](Self::definition) as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.definition())
    }
}

impl fmt::Display for ListenerRuleCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Listener({} {}:{}, {} rules)",
            self.identifier,
            self.listener.protocol,
            self.listener.port(),
            self.rules.len()
        )
    }
}

/// Serializable view of a listener and its committed rules.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerDefinition<'a> {
    pub name: &'a str,
    pub protocol: Protocol,
    pub port: u16,
    pub service_identifier: &'a str,
    pub default_action: &'a Action,
    pub rules: Vec<RuleDefinition<'a>>,
}
