//! Usage spending budget.

use serde::{Deserialize, Serialize};

use super::collection::ResourceAttributes;

/// Monthly usage budget a partner sets for a customer. An absent amount
/// means no budget is configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingBudget {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

impl SpendingBudget {
    pub fn new(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }
}
