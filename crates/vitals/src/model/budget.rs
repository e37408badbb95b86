use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ordered::OrderedMap;
use crate::validation::{finite, non_negative_amount, positive_amount, when_present, Validate, ValidationError};

/// Budget position as stored.
///
/// `burn_rate` is supplied by the caller as a percentage and is not derived
/// from `spent_amount / total_budget`; keeping the two consistent is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
  pub id: Uuid,
  pub total_budget: f64,
  pub spent_amount: f64,
  pub burn_rate: f64,
  pub projected_completion: f64,
  pub monthly_spend: OrderedMap<f64>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
  pub total_budget: f64,
  pub spent_amount: f64,
  pub burn_rate: f64,
  pub projected_completion: f64,
  pub monthly_spend: OrderedMap<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
  pub total_budget: Option<f64>,
  pub spent_amount: Option<f64>,
  pub burn_rate: Option<f64>,
  pub projected_completion: Option<f64>,
  pub monthly_spend: Option<OrderedMap<f64>>,
}

impl BudgetSnapshot {
  pub fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: BudgetDraft) -> Self {
    Self {
      id,
      total_budget: draft.total_budget,
      spent_amount: draft.spent_amount,
      burn_rate: draft.burn_rate,
      projected_completion: draft.projected_completion,
      monthly_spend: draft.monthly_spend,
      created_at,
    }
  }

  pub fn apply(&mut self, patch: BudgetPatch) {
    if let Some(total_budget) = patch.total_budget {
      self.total_budget = total_budget;
    }
    if let Some(spent_amount) = patch.spent_amount {
      self.spent_amount = spent_amount;
    }
    if let Some(burn_rate) = patch.burn_rate {
      self.burn_rate = burn_rate;
    }
    if let Some(projected_completion) = patch.projected_completion {
      self.projected_completion = projected_completion;
    }
    if let Some(monthly_spend) = patch.monthly_spend {
      self.monthly_spend = monthly_spend;
    }
  }
}

impl Validate for BudgetDraft {
  fn validate(&self) -> Result<(), ValidationError> {
    positive_amount("totalBudget", self.total_budget)?;
    non_negative_amount("spentAmount", self.spent_amount)?;
    finite("burnRate", self.burn_rate)?;
    finite("projectedCompletion", self.projected_completion)
  }
}

impl Validate for BudgetPatch {
  fn validate(&self) -> Result<(), ValidationError> {
    when_present(self.total_budget, |v| positive_amount("totalBudget", v))?;
    when_present(self.spent_amount, |v| non_negative_amount("spentAmount", v))?;
    when_present(self.burn_rate, |v| finite("burnRate", v))?;
    when_present(self.projected_completion, |v| finite("projectedCompletion", v))
  }
}
