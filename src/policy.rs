//! Flattening of high-level authorization statements into a policy document.
//!
//! The document is handed to the provisioning layer verbatim as an opaque
//! JSON string. Every statement grants or denies the single service
//! invocation action; principals and conditions are passed through untouched.

use serde::{Deserialize, Serialize};

/// Policy language version stamped on every document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The only action a service-network auth policy statement covers.
pub const INVOKE_ACTION: &str = "vpc-lattice-svcs:Invoke";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    #[serde(alias = "ALLOW", alias = "allow")]
    Allow,
    #[serde(alias = "DENY", alias = "deny")]
    Deny,
}

/// One resource identifier or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resources {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Resources {
    fn from(resource: &str) -> Self {
        Resources::One(resource.to_owned())
    }
}

impl From<String> for Resources {
    fn from(resource: String) -> Self {
        Resources::One(resource)
    }
}

impl From<Vec<String>> for Resources {
    fn from(resources: Vec<String>) -> Self {
        Resources::Many(resources)
    }
}

/// A high-level allow/deny statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatement {
    pub effect: Effect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<serde_json::Value>,
    pub resources: Resources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

impl AuthStatement {
    #[must_use]
    pub fn allow(resources: impl Into<Resources>) -> Self {
        Self::new(Effect::Allow, resources)
    }

    #[must_use]
    pub fn deny(resources: impl Into<Resources>) -> Self {
        Self::new(Effect::Deny, resources)
    }

    #[must_use]
    pub fn new(effect: Effect, resources: impl Into<Resources>) -> Self {
        Self {
            effect,
            principal: None,
            resources: resources.into(),
            conditions: None,
        }
    }

    #[must_use]
    pub fn principal(mut self, principal: serde_json::Value) -> Self {
        self.principal = Some(principal);
        self
    }

    #[must_use]
    pub fn conditions(mut self, conditions: serde_json::Value) -> Self {
        self.conditions = Some(conditions);
        self
    }
}

/// A normalized statement inside a [`PolicyDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub effect: Effect,
    pub action: String,
    pub resource: Resources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Render the document as the compact JSON string the provisioning layer
    /// consumes.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Flatten `statements`, in order, into a policy document.
#[must_use]
pub fn flatten(statements: &[AuthStatement]) -> PolicyDocument {
    let statement = statements
        .iter()
        .map(|s| PolicyStatement {
            effect: s.effect,
            action: INVOKE_ACTION.to_owned(),
            resource: s.resources.clone(),
            principal: s.principal.clone(),
            condition: s.conditions.clone(),
        })
        .collect();

    PolicyDocument {
        version: POLICY_VERSION.to_owned(),
        statement,
    }
}
