use crate::{RuleError, RuleSet};

/// Reject `priority` if a rule already committed to `rules` uses it.
pub(crate) fn check_priority(rules: &RuleSet, rule: &str, priority: u32) -> Result<(), RuleError> {
    if rules.contains_priority(priority) {
        return Err(RuleError::DuplicatePriority {
            rule: rule.to_owned(),
            priority,
        });
    }
    Ok(())
}
