use thiserror::Error;

use crate::RuleError;

/// Unified error type covering rule validation, JSON decoding, and I/O.
///
/// Returned by convenience methods like
/// [`ListenerRuleCompiler::from_json()`](crate::ListenerRuleCompiler::from_json)
/// and [`ListenerRuleCompiler::from_file()`](crate::ListenerRuleCompiler::from_file).
#[derive(Debug, Error)]
pub enum LatticeError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
