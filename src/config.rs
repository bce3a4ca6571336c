//! JSON configuration for a listener, its rules and auth policies.
//!
//! ```json
//! {
//!   "listener": {
//!     "name": "api",
//!     "protocol": "HTTPS",
//!     "serviceIdentifier": "svc-0123",
//!     "defaultAction": 404
//!   },
//!   "rules": [
//!     {
//!       "name": "service-one",
//!       "priority": 100,
//!       "action": [{ "target": "tg-one" }],
//!       "pathMatch": { "matchType": "EXACT", "value": "/serviceOne" }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::policy::{self, AuthStatement, PolicyDocument};
use crate::{LatticeError, Listener, ListenerRuleCompiler, RuleError, RuleSpec};

/// A listener together with the rules to compile into it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerConfig {
    pub listener: Listener,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// The statements of an auth policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPolicyConfig {
    pub auth_statements: Vec<AuthStatement>,
}

impl ListenerRuleCompiler {
    /// Build a compiler for the configured listener and add every rule in
    /// order, stopping at the first rejected rule.
    ///
    /// # Errors
    ///
    /// Returns the [`RuleError`] of the default action or of the first rule
    /// that fails validation.
    pub fn from_config(config: ListenerConfig) -> Result<Self, RuleError> {
        let mut compiler = Self::new(config.listener)?;
        for spec in config.rules {
            compiler.add_rule(spec)?;
        }
        tracing::debug!(
            listener = %compiler.identifier(),
            rules = compiler.len(),
            "listener configuration compiled"
        );
        Ok(compiler)
    }

    /// Parse a JSON [`ListenerConfig`] and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError`] on decoding or validation failure.
    pub fn from_json(input: &str) -> Result<Self, LatticeError> {
        let config: ListenerConfig = serde_json::from_str(input)?;
        Ok(Self::from_config(config)?)
    }

    /// Read a JSON [`ListenerConfig`] file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError`] on I/O, decoding, or validation failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, LatticeError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }
}

/// Parse a JSON [`AuthPolicyConfig`] and flatten it into a policy document.
///
/// # Errors
///
/// Returns [`LatticeError::Json`] if the input does not decode.
pub fn auth_policy_from_json(input: &str) -> Result<PolicyDocument, LatticeError> {
    let config: AuthPolicyConfig = serde_json::from_str(input)?;
    Ok(policy::flatten(&config.auth_statements))
}
