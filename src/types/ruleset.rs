use std::collections::BTreeSet;
use std::fmt;

use super::rule::Rule;

/// The committed rules of one listener, in insertion order.
///
/// The set of priorities in use is tracked alongside the rules and is the
/// authoritative uniqueness domain. Rules are only ever appended, by
/// [`ListenerRuleCompiler::add_rule()`](crate::ListenerRuleCompiler::add_rule),
/// after every check has passed.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    priorities: BTreeSet<u32>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in the order they were added.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Whether a rule with this priority has already been committed.
    #[must_use]
    pub fn contains_priority(&self, priority: u32) -> bool {
        self.priorities.contains(&priority)
    }

    /// Priorities in use, ascending.
    pub fn priorities(&self) -> impl Iterator<Item = u32> + '_ {
        self.priorities.iter().copied()
    }

    /// Look up a rule by name. Names are not required to be unique; the first
    /// rule added under `name` is returned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Rules in the order the data plane evaluates them: lowest priority first.
    #[must_use]
    pub fn evaluation_order(&self) -> Vec<&Rule> {
        let mut ordered: Vec<&Rule> = self.rules.iter().collect();
        ordered.sort_by_key(|r| r.priority);
        ordered
    }

    /// Append a fully validated rule. Callers must have checked the priority.
    pub(crate) fn commit(&mut self, rule: Rule) -> &Rule {
        debug_assert!(!self.priorities.contains(&rule.priority));
        self.priorities.insert(rule.priority);
        self.rules.push(rule);
        &self.rules[self.rules.len() - 1]
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({} rules)", self.rules.len())
    }
}
