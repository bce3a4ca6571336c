mod compile;
mod config;
mod error;
pub mod policy;
mod types;

pub use config::{auth_policy_from_json, AuthPolicyConfig, ListenerConfig};
pub use error::LatticeError;
pub use types::{
    Action, ActionSpec, HeaderMatch, HeaderMatchSpec, HeaderValueMatch, HttpMatch, HttpMethod,
    Listener, ListenerDefinition, ListenerRuleCompiler, MatchCriteria, MatchSpec, PathMatch,
    PathMatchSpec, PathValueMatch, Protocol, Rule, RuleBuilder, RuleDefinition, RuleError,
    RuleSet, RuleSpec, TargetReference, WeightedTargetGroup, DEFAULT_CASE_SENSITIVE,
    DEFAULT_WEIGHT,
};
