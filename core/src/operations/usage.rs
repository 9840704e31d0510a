//! A customer's usage spending budget.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::{require, Identifier};
use crate::error::Result;
use crate::models::SpendingBudget;

const GET_SPENDING_BUDGET: &str = "GetCustomerUsageSpendingBudget";
const PATCH_SPENDING_BUDGET: &str = "PatchCustomerUsageSpendingBudget";

/// The usage spending budget a partner allocates to a customer.
#[derive(Debug, Clone)]
pub struct CustomerUsageSpendingBudgetOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
}

impl CustomerUsageSpendingBudgetOperations {
    pub fn new(client: Arc<PartnerClient>, customer_id: impl Into<String>) -> Result<Self> {
        Ok(Self::from_parts(client, Identifier::new("customerId", customer_id)?))
    }

    pub(crate) fn from_parts(client: Arc<PartnerClient>, customer_id: Identifier) -> Self {
        Self {
            client,
            customer_id,
        }
    }

    pub fn context(&self) -> &str {
        self.customer_id.as_str()
    }

    pub fn get(&self) -> Result<SpendingBudget> {
        self.client
            .call(GET_SPENDING_BUDGET)?
            .path_args([&self.customer_id])
            .get()
    }

    /// Replace the budget. `None` fails before any request is made.
    pub fn patch(&self, budget: Option<&SpendingBudget>) -> Result<SpendingBudget> {
        let budget = require("usage spending budget", budget)?;
        self.client
            .call(PATCH_SPENDING_BUDGET)?
            .path_args([&self.customer_id])
            .patch(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartnerError;
    use crate::http::HttpMethod;
    use crate::test_support::{client, RecordingTransport};

    #[test]
    fn get_budget() {
        let (client, transport) = client(vec![RecordingTransport::ok(r#"{"amount":100.0}"#)]);
        let budget = CustomerUsageSpendingBudgetOperations::new(client, "cust-1")
            .unwrap()
            .get()
            .unwrap();
        assert_eq!(budget.amount, Some(100.0));
        assert_eq!(
            transport.requests()[0].path,
            "http://localhost:3000/v1/customers/cust-1/usagebudget"
        );
    }

    #[test]
    fn patch_sends_budget_as_body() {
        let (client, transport) = client(vec![RecordingTransport::ok(r#"{"amount":250.0}"#)]);
        let updated = CustomerUsageSpendingBudgetOperations::new(client, "cust-1")
            .unwrap()
            .patch(Some(&SpendingBudget::new(250.0)))
            .unwrap();
        assert_eq!(updated.amount, Some(250.0));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(sent.path, "http://localhost:3000/v1/customers/cust-1/usagebudget");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["amount"], 250.0);
    }

    #[test]
    fn patch_none_never_sends() {
        let (client, transport) = client(vec![]);
        let err = CustomerUsageSpendingBudgetOperations::new(client, "cust-1")
            .unwrap()
            .patch(None)
            .unwrap_err();
        assert!(matches!(err, PartnerError::InvalidArgument(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn blank_customer_is_rejected() {
        let (client, _) = client(vec![]);
        assert!(matches!(
            CustomerUsageSpendingBudgetOperations::new(client, "").unwrap_err(),
            PartnerError::InvalidArgument(_)
        ));
    }
}
