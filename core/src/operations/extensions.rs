//! Product extensions: inventory checks per country.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::Identifier;
use crate::error::Result;
use crate::models::{InventoryCheckRequest, InventoryItem};

const CHECK_INVENTORY: &str = "CheckInventory";

#[derive(Debug, Clone)]
pub struct ProductExtensionsOperations {
    client: Arc<PartnerClient>,
}

impl ProductExtensionsOperations {
    pub fn new(client: Arc<PartnerClient>) -> Self {
        Self { client }
    }

    pub fn by_country(&self, country: impl Into<String>) -> Result<ProductExtensionsByCountryOperations> {
        ProductExtensionsByCountryOperations::new(self.client.clone(), country)
    }
}

#[derive(Debug, Clone)]
pub struct ProductExtensionsByCountryOperations {
    client: Arc<PartnerClient>,
    country: Identifier,
}

impl ProductExtensionsByCountryOperations {
    pub fn new(client: Arc<PartnerClient>, country: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            country: Identifier::new("country", country)?,
        })
    }

    pub fn context(&self) -> &str {
        self.country.as_str()
    }

    /// Check whether the requested items can be purchased in this country.
    /// Restricted items come back with their restrictions filled in.
    pub fn check_inventory(&self, request: &InventoryCheckRequest) -> Result<Vec<InventoryItem>> {
        self.client
            .call(CHECK_INVENTORY)?
            .query("Country", &self.country)?
            .post(request)
    }
}
