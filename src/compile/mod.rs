//! Validation and normalization of caller-supplied rule specifications.
//!
//! Each stage is a pure function over borrowed input. [`compile_rule`] runs
//! them in a fixed order (priority, action, match) and returns the finished
//! [`Rule`] without touching the rule set; committing is left to the caller so
//! a rejected rule can never be partially applied.

mod action;
mod matcher;
mod priority;

pub(crate) use action::resolve_action;
pub(crate) use matcher::build_match;
pub(crate) use priority::check_priority;

use crate::{Rule, RuleError, RuleSet, RuleSpec};

pub(crate) fn compile_rule(rules: &RuleSet, spec: &RuleSpec) -> Result<Rule, RuleError> {
    check_priority(rules, &spec.name, spec.priority)?;
    let action = resolve_action(&spec.name, &spec.action)?;
    let criteria = build_match(&spec.name, &spec.matches)?;

    Ok(Rule {
        name: spec.name.clone(),
        priority: spec.priority,
        action,
        criteria,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, HeaderMatchSpec, PathMatchSpec, TargetReference};

    fn committed(priority: u32) -> RuleSet {
        let mut rules = RuleSet::new();
        let spec = RuleSpec::new("existing", priority, 200).method_match("GET");
        let rule = compile_rule(&rules, &spec).unwrap();
        rules.commit(rule);
        rules
    }

    #[test]
    fn compile_forward_path_rule() {
        let spec = RuleSpec::new("svc-one", 100, vec![TargetReference::new("tg1")])
            .path_match(PathMatchSpec::exact("/serviceOne"));
        let rule = compile_rule(&RuleSet::new(), &spec).unwrap();
        assert_eq!(rule.name(), "svc-one");
        assert_eq!(rule.priority(), 100);
        assert_eq!(rule.action().target_groups()[0].weight, 100);
    }

    #[test]
    fn duplicate_priority_reported_before_action_and_match() {
        // Both the action and the match are invalid too; the priority wins.
        let spec = RuleSpec::new("clash", 7, Vec::new());
        let err = compile_rule(&committed(7), &spec).unwrap_err();
        assert!(matches!(err, RuleError::DuplicatePriority { priority: 7, .. }));
    }

    #[test]
    fn action_checked_before_match() {
        let spec = RuleSpec::new(
            "split",
            200,
            vec![
                TargetReference::new("tg-a"),
                TargetReference::weighted("tg-b", 30),
            ],
        );
        let err = compile_rule(&RuleSet::new(), &spec).unwrap_err();
        assert!(matches!(err, RuleError::MissingWeight { ref target, .. } if target == "tg-a"));
    }

    #[test]
    fn invalid_match_after_valid_action() {
        let spec = RuleSpec::new("two-kinds", 300, 200)
            .method_match("POST")
            .path_match(PathMatchSpec::prefix("/"));
        let err = compile_rule(&RuleSet::new(), &spec).unwrap_err();
        assert!(matches!(err, RuleError::InvalidMatchSpec { .. }));
    }

    #[test]
    fn compile_does_not_mutate() {
        let rules = committed(1);
        let spec = RuleSpec::new("hdr", 2, 404)
            .header_matches(vec![HeaderMatchSpec::exact("x-a", "b")]);
        let rule = compile_rule(&rules, &spec).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(!rules.contains_priority(2));
        assert_eq!(rule.action(), &Action::FixedResponse { status_code: 404 });
    }
}
