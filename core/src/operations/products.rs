//! Products available to a customer, optionally narrowed by catalog view,
//! target segment and reservation scope.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::Identifier;
use crate::error::Result;
use crate::models::{Product, ResourceCollection};

use super::skus::CustomerSkuCollectionOperations;

const GET_CUSTOMER_PRODUCTS: &str = "GetCustomerProducts";
const GET_CUSTOMER_PRODUCT: &str = "GetCustomerProduct";

#[derive(Debug, Clone)]
pub struct CustomerProductCollectionOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
}

impl CustomerProductCollectionOperations {
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

    pub fn by_id(&self, product_id: impl Into<String>) -> Result<CustomerProductOperations> {
        Ok(CustomerProductOperations {
            client: self.client.clone(),
            customer_id: self.customer_id.clone(),
            product_id: Identifier::new("productId", product_id)?,
        })
    }

    pub fn by_target_view(
        &self,
        target_view: impl Into<String>,
    ) -> Result<CustomerProductCollectionByTargetViewOperations> {
        Ok(CustomerProductCollectionByTargetViewOperations {
            client: self.client.clone(),
            customer_id: self.customer_id.clone(),
            target_view: Identifier::new("targetView", target_view)?,
        })
    }
}

/// One product, as seen by one customer.
#[derive(Debug, Clone)]
pub struct CustomerProductOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    product_id: Identifier,
}

impl CustomerProductOperations {
    pub fn new(
        client: Arc<PartnerClient>,
        customer_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Result<Self> {
        CustomerProductCollectionOperations::new(client, customer_id)?.by_id(product_id)
    }

    pub fn context(&self) -> (&str, &str) {
        (self.customer_id.as_str(), self.product_id.as_str())
    }

    pub fn get(&self) -> Result<Product> {
        self.client
            .call(GET_CUSTOMER_PRODUCT)?
            .path_args([&self.customer_id, &self.product_id])
            .get()
    }

    pub fn skus(&self) -> CustomerSkuCollectionOperations {
        CustomerSkuCollectionOperations::from_parts(
            self.client.clone(),
            self.customer_id.clone(),
            self.product_id.clone(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CustomerProductCollectionByTargetViewOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    target_view: Identifier,
}

impl CustomerProductCollectionByTargetViewOperations {
    pub fn context(&self) -> (&str, &str) {
        (self.customer_id.as_str(), self.target_view.as_str())
    }

    pub fn get(&self) -> Result<ResourceCollection<Product>> {
        self.client
            .call(GET_CUSTOMER_PRODUCTS)?
            .path_args([&self.customer_id])
            .query("TargetView", &self.target_view)?
            .get()
    }

    pub fn by_target_segment(
        &self,
        target_segment: impl Into<String>,
    ) -> Result<CustomerProductCollectionByTargetViewByTargetSegmentOperations> {
        Ok(CustomerProductCollectionByTargetViewByTargetSegmentOperations::from_parts(
            self.client.clone(),
            self.customer_id.clone(),
            self.target_view.clone(),
            Identifier::new("targetSegment", target_segment)?,
        ))
    }
}

/// Products in a catalog view for a customer, filtered by target segment.
#[derive(Debug, Clone)]
pub struct CustomerProductCollectionByTargetViewByTargetSegmentOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    target_view: Identifier,
    target_segment: Identifier,
}

impl CustomerProductCollectionByTargetViewByTargetSegmentOperations {
    pub fn new(
        client: Arc<PartnerClient>,
        customer_id: impl Into<String>,
        target_view: impl Into<String>,
        target_segment: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            client,
            Identifier::new("customerId", customer_id)?,
            Identifier::new("targetView", target_view)?,
            Identifier::new("targetSegment", target_segment)?,
        ))
    }

    fn from_parts(
        client: Arc<PartnerClient>,
        customer_id: Identifier,
        target_view: Identifier,
        target_segment: Identifier,
    ) -> Self {
        Self {
            client,
            customer_id,
            target_view,
            target_segment,
        }
    }

    pub fn context(&self) -> (&str, &str, &str) {
        (
            self.customer_id.as_str(),
            self.target_view.as_str(),
            self.target_segment.as_str(),
        )
    }

    pub fn get(&self) -> Result<ResourceCollection<Product>> {
        self.client
            .call(GET_CUSTOMER_PRODUCTS)?
            .path_args([&self.customer_id])
            .query("TargetView", &self.target_view)?
            .query("TargetSegment", &self.target_segment)?
            .get()
    }

    pub fn by_reservation_scope(
        &self,
        reservation_scope: impl Into<String>,
    ) -> Result<CustomerProductCollectionByTargetViewByTargetSegmentByReservationScopeOperations>
    {
        Ok(
            CustomerProductCollectionByTargetViewByTargetSegmentByReservationScopeOperations {
                client: self.client.clone(),
                customer_id: self.customer_id.clone(),
                target_view: self.target_view.clone(),
                target_segment: self.target_segment.clone(),
                reservation_scope: Identifier::new("reservationScope", reservation_scope)?,
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct CustomerProductCollectionByTargetViewByTargetSegmentByReservationScopeOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    target_view: Identifier,
    target_segment: Identifier,
    reservation_scope: Identifier,
}

impl CustomerProductCollectionByTargetViewByTargetSegmentByReservationScopeOperations {
    pub fn context(&self) -> (&str, &str, &str, &str) {
        (
            self.customer_id.as_str(),
            self.target_view.as_str(),
            self.target_segment.as_str(),
            self.reservation_scope.as_str(),
        )
    }

    pub fn get(&self) -> Result<ResourceCollection<Product>> {
        self.client
            .call(GET_CUSTOMER_PRODUCTS)?
            .path_args([&self.customer_id])
            .query("TargetView", &self.target_view)?
            .query("TargetSegment", &self.target_segment)?
            .query("ReservationScope", &self.reservation_scope)?
            .get()
    }
}
