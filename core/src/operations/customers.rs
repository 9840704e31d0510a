//! Customers of the partner and navigation into their resources.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::Identifier;
use crate::error::Result;
use crate::models::Customer;

use super::products::CustomerProductCollectionOperations;
use super::service_requests::ServiceRequestCollectionOperations;
use super::usage::CustomerUsageSpendingBudgetOperations;

const GET_CUSTOMER: &str = "GetCustomer";

/// The partner's customers.
#[derive(Debug, Clone)]
pub struct CustomerCollectionOperations {
    client: Arc<PartnerClient>,
}

impl CustomerCollectionOperations {
    pub fn new(client: Arc<PartnerClient>) -> Self {
        Self { client }
    }

    pub fn by_id(&self, customer_id: impl Into<String>) -> Result<CustomerOperations> {
        CustomerOperations::new(self.client.clone(), customer_id)
    }
}

/// A single customer and the resources beneath it.
#[derive(Debug, Clone)]
pub struct CustomerOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
}

impl CustomerOperations {
    pub fn new(client: Arc<PartnerClient>, customer_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            customer_id: Identifier::new("customerId", customer_id)?,
        })
    }

    pub fn context(&self) -> &str {
        self.customer_id.as_str()
    }

    pub fn get(&self) -> Result<Customer> {
        self.client
            .call(GET_CUSTOMER)?
            .path_args([&self.customer_id])
            .get()
    }

    pub fn products(&self) -> CustomerProductCollectionOperations {
        CustomerProductCollectionOperations::from_parts(self.client.clone(), self.customer_id.clone())
    }

    pub fn usage_budget(&self) -> CustomerUsageSpendingBudgetOperations {
        CustomerUsageSpendingBudgetOperations::from_parts(self.client.clone(), self.customer_id.clone())
    }

    pub fn service_requests(&self) -> ServiceRequestCollectionOperations {
        ServiceRequestCollectionOperations::for_customer_id(self.client.clone(), self.customer_id.clone())
    }
}
