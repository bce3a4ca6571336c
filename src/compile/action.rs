use std::ops::RangeInclusive;

use crate::types::DEFAULT_WEIGHT;
use crate::{Action, ActionSpec, RuleError, TargetReference, WeightedTargetGroup};

/// Status codes outside this range are accepted but logged.
const HTTP_STATUS_RANGE: RangeInclusive<u32> = 100..=599;

/// Weights above this are accepted but logged.
const MAX_WEIGHT: u32 = 100;

/// Resolve a caller-supplied action into its provisioning form.
///
/// A bare status code becomes a fixed response. A target list becomes a
/// forward action: with more than one target every reference must carry a
/// weight, and a lone unweighted target receives [`DEFAULT_WEIGHT`]. Target
/// order is preserved and weights are passed through unnormalized.
pub(crate) fn resolve_action(rule: &str, spec: &ActionSpec) -> Result<Action, RuleError> {
    match spec {
        ActionSpec::FixedResponse(status_code) => {
            let status_code = *status_code;
            if !HTTP_STATUS_RANGE.contains(&status_code) {
                tracing::warn!(
                    rule,
                    status_code,
                    "fixed response status code outside the HTTP range"
                );
            }
            Ok(Action::FixedResponse { status_code })
        }
        ActionSpec::Forward(targets) => resolve_forward(rule, targets),
    }
}

fn resolve_forward(rule: &str, targets: &[TargetReference]) -> Result<Action, RuleError> {
    if targets.is_empty() {
        return Err(RuleError::EmptyAction {
            rule: rule.to_owned(),
        });
    }

    let require_weight = targets.len() > 1;
    let target_groups = targets
        .iter()
        .map(|target| {
            let weight = match target.weight {
                Some(weight) => weight,
                None if require_weight => {
                    return Err(RuleError::MissingWeight {
                        rule: rule.to_owned(),
                        target: target.target.clone(),
                    });
                }
                None => DEFAULT_WEIGHT,
            };
            if weight > MAX_WEIGHT {
                tracing::warn!(
                    rule,
                    target = %target.target,
                    weight,
                    "target group weight above {}",
                    MAX_WEIGHT
                );
            }
            Ok(WeightedTargetGroup {
                target_group_identifier: target.target.clone(),
                weight,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Action::Forward { target_groups })
}
