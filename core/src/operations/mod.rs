//! Resource operations, reached by navigating from `PartnerOperations`.
//!
//! # Design
//! Each operations type binds a validated context to the routes of one
//! resource. Methods that fetch or mutate issue exactly one request through
//! the shared `PartnerClient`; navigation methods (`by_id`,
//! `by_target_segment`, ...) only build a more specific operations value and
//! never touch the network. Every type is immutable and cheap to clone.

pub mod customers;
pub mod extensions;
pub mod invoices;
pub mod products;
pub mod service_requests;
pub mod skus;
pub mod usage;

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::config::PartnerConfig;
use crate::error::Result;

pub use customers::{CustomerCollectionOperations, CustomerOperations};
pub use extensions::{ProductExtensionsByCountryOperations, ProductExtensionsOperations};
pub use invoices::{InvoiceCollectionOperations, InvoiceLineItemCollectionOperations, InvoiceOperations};
pub use products::{
    CustomerProductCollectionByTargetViewByTargetSegmentByReservationScopeOperations,
    CustomerProductCollectionByTargetViewByTargetSegmentOperations,
    CustomerProductCollectionByTargetViewOperations, CustomerProductCollectionOperations,
    CustomerProductOperations,
};
pub use service_requests::{ServiceRequestCollectionOperations, ServiceRequestOperations};
pub use skus::{
    CustomerSkuCollectionByTargetSegmentOperations, CustomerSkuCollectionOperations,
    CustomerSkuOperations,
};
pub use usage::CustomerUsageSpendingBudgetOperations;

/// Entry point into the operations tree.
#[derive(Debug, Clone)]
pub struct PartnerOperations {
    client: Arc<PartnerClient>,
}

impl PartnerOperations {
    pub fn new(client: PartnerClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Client over the built-in route table and the default transport.
    pub fn from_config(config: PartnerConfig) -> Result<Self> {
        Ok(Self::new(PartnerClient::new(config)?))
    }

    pub fn client(&self) -> &Arc<PartnerClient> {
        &self.client
    }

    pub fn customers(&self) -> CustomerCollectionOperations {
        CustomerCollectionOperations::new(self.client.clone())
    }

    pub fn invoices(&self) -> InvoiceCollectionOperations {
        InvoiceCollectionOperations::new(self.client.clone())
    }

    pub fn product_extensions(&self) -> ProductExtensionsOperations {
        ProductExtensionsOperations::new(self.client.clone())
    }

    pub fn service_requests(&self) -> ServiceRequestCollectionOperations {
        ServiceRequestCollectionOperations::for_partner(self.client.clone())
    }
}
