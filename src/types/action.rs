use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a target group, optionally weighted.
///
/// When a forward action lists more than one target group every reference
/// must carry a weight. A single reference without a weight receives
/// [`DEFAULT_WEIGHT`](crate::DEFAULT_WEIGHT).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReference {
    #[serde(alias = "targetGroupIdentifier")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl TargetReference {
    /// An unweighted reference to `target`.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            weight: None,
        }
    }

    /// A reference to `target` carrying an explicit weight.
    #[must_use]
    pub fn weighted(target: impl Into<String>, weight: u32) -> Self {
        Self {
            target: target.into(),
            weight: Some(weight),
        }
    }
}

/// The action of a rule as the caller supplies it: either a bare status code
/// or a list of target references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionSpec {
    FixedResponse(u32),
    Forward(Vec<TargetReference>),
}

impl ActionSpec {
    #[must_use]
    pub fn fixed(status_code: u32) -> Self {
        ActionSpec::FixedResponse(status_code)
    }

    #[must_use]
    pub fn forward(targets: impl IntoIterator<Item = TargetReference>) -> Self {
        ActionSpec::Forward(targets.into_iter().collect())
    }
}

impl From<u32> for ActionSpec {
    fn from(status_code: u32) -> Self {
        ActionSpec::FixedResponse(status_code)
    }
}

impl From<Vec<TargetReference>> for ActionSpec {
    fn from(targets: Vec<TargetReference>) -> Self {
        ActionSpec::Forward(targets)
    }
}

/// A target group with its resolved weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedTargetGroup {
    pub target_group_identifier: String,
    pub weight: u32,
}

/// A resolved rule action, in the shape the provisioning layer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    FixedResponse { status_code: u32 },
    #[serde(rename_all = "camelCase")]
    Forward {
        target_groups: Vec<WeightedTargetGroup>,
    },
}

impl Action {
    /// The resolved target groups, empty for a fixed response.
    #[must_use]
    pub fn target_groups(&self) -> &[WeightedTargetGroup] {
        match self {
            Action::FixedResponse { .. } => &[],
            Action::Forward { target_groups } => target_groups,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::FixedResponse { status_code } => write!(f, "respond {status_code}"),
            Action::Forward { target_groups } => {
                write!(f, "forward ")?;
                for (i, tg) in target_groups.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}:{}", tg.target_group_identifier, tg.weight)?;
                }
                Ok(())
            }
        }
    }
}
