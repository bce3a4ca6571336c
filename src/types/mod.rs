mod action;
mod error;
mod listener;
mod matcher;
mod rule;
mod ruleset;

pub use action::{Action, ActionSpec, TargetReference, WeightedTargetGroup};
pub use error::RuleError;
pub use listener::{Listener, ListenerDefinition, ListenerRuleCompiler, Protocol};
pub use matcher::{
    HeaderMatch, HeaderMatchSpec, HeaderValueMatch, HttpMethod, MatchCriteria, MatchSpec,
    PathMatch, PathMatchSpec, PathValueMatch,
};
pub use rule::{HttpMatch, Rule, RuleBuilder, RuleDefinition, RuleSpec};
pub use ruleset::RuleSet;

/// Weight given to the only target of a forward action when none is set.
pub const DEFAULT_WEIGHT: u32 = 100;

/// Path and header matches are case-insensitive unless asked otherwise.
pub const DEFAULT_CASE_SENSITIVE: bool = false;
