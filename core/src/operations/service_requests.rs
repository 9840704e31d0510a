//! Support service requests, at partner scope or under one customer.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::{require, Identifier};
use crate::error::{RequestFailure, Result};
use crate::models::{ResourceCollection, ServiceRequest, ServiceRequestFilter};

const GET_SERVICE_REQUESTS: &str = "GetServiceRequests";
const GET_CUSTOMER_SERVICE_REQUESTS: &str = "GetCustomerServiceRequests";
const GET_SERVICE_REQUEST: &str = "GetServiceRequest";
const PATCH_SERVICE_REQUEST: &str = "PatchServiceRequest";

#[derive(Debug, Clone)]
pub struct ServiceRequestCollectionOperations {
    client: Arc<PartnerClient>,
    customer_id: Option<Identifier>,
}

impl ServiceRequestCollectionOperations {
    /// Service requests the partner opened for itself.
    pub fn for_partner(client: Arc<PartnerClient>) -> Self {
        Self {
            client,
            customer_id: None,
        }
    }

    pub fn for_customer(client: Arc<PartnerClient>, customer_id: impl Into<String>) -> Result<Self> {
        Ok(Self::for_customer_id(client, Identifier::new("customerId", customer_id)?))
    }

    pub(crate) fn for_customer_id(client: Arc<PartnerClient>, customer_id: Identifier) -> Self {
        Self {
            client,
            customer_id: Some(customer_id),
        }
    }

    /// The customer this collection is scoped to, if any.
    pub fn context(&self) -> Option<&str> {
        self.customer_id.as_ref().map(Identifier::as_str)
    }

    pub fn get(&self) -> Result<ResourceCollection<ServiceRequest>> {
        self.scoped_call(None)
    }

    /// Service requests matching a single-field filter.
    pub fn query(&self, filter: &ServiceRequestFilter) -> Result<ResourceCollection<ServiceRequest>> {
        self.scoped_call(Some(filter))
    }

    pub fn by_id(&self, service_request_id: impl Into<String>) -> Result<ServiceRequestOperations> {
        Ok(ServiceRequestOperations {
            client: self.client.clone(),
            service_request_id: Identifier::new("serviceRequestId", service_request_id)?,
        })
    }

    fn scoped_call(
        &self,
        filter: Option<&ServiceRequestFilter>,
    ) -> Result<ResourceCollection<ServiceRequest>> {
        let mut call = match &self.customer_id {
            Some(customer_id) => self
                .client
                .call(GET_CUSTOMER_SERVICE_REQUESTS)?
                .path_args([customer_id]),
            None => self.client.call(GET_SERVICE_REQUESTS)?,
        };
        if let Some(filter) = filter {
            let encoded = serde_json::to_string(filter)
                .map_err(|e| RequestFailure::encoding(e.to_string()))?;
            call = call.query("Filter", encoded)?;
        }
        call.get()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceRequestOperations {
    client: Arc<PartnerClient>,
    service_request_id: Identifier,
}

impl ServiceRequestOperations {
    pub fn context(&self) -> &str {
        self.service_request_id.as_str()
    }

    pub fn get(&self) -> Result<ServiceRequest> {
        self.client
            .call(GET_SERVICE_REQUEST)?
            .path_args([&self.service_request_id])
            .get()
    }

    /// Update status or add a note. `None` fails before any request is made.
    pub fn patch(&self, update: Option<&ServiceRequest>) -> Result<ServiceRequest> {
        let update = require("service request", update)?;
        self.client
            .call(PATCH_SERVICE_REQUEST)?
            .path_args([&self.service_request_id])
            .patch(update)
    }
}
