//! SKUs of a product, scoped to a customer.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::Identifier;
use crate::error::Result;
use crate::models::{ResourceCollection, Sku};

const GET_CUSTOMER_SKUS: &str = "GetCustomerSkus";
const GET_CUSTOMER_SKU: &str = "GetCustomerSku";

/// All SKUs of one product for one customer.
#[derive(Debug, Clone)]
pub struct CustomerSkuCollectionOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    product_id: Identifier,
}

impl CustomerSkuCollectionOperations {
    pub fn new(
        client: Arc<PartnerClient>,
        customer_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            client,
            Identifier::new("customerId", customer_id)?,
            Identifier::new("productId", product_id)?,
        ))
    }

    pub(crate) fn from_parts(
        client: Arc<PartnerClient>,
        customer_id: Identifier,
        product_id: Identifier,
    ) -> Self {
        Self {
            client,
            customer_id,
            product_id,
        }
    }

    pub fn context(&self) -> (&str, &str) {
        (self.customer_id.as_str(), self.product_id.as_str())
    }

    pub fn by_id(&self, sku_id: impl Into<String>) -> Result<CustomerSkuOperations> {
        Ok(CustomerSkuOperations {
            client: self.client.clone(),
            customer_id: self.customer_id.clone(),
            product_id: self.product_id.clone(),
            sku_id: Identifier::new("skuId", sku_id)?,
        })
    }

    pub fn by_target_segment(
        &self,
        target_segment: impl Into<String>,
    ) -> Result<CustomerSkuCollectionByTargetSegmentOperations> {
        Ok(CustomerSkuCollectionByTargetSegmentOperations {
            client: self.client.clone(),
            customer_id: self.customer_id.clone(),
            product_id: self.product_id.clone(),
            target_segment: Identifier::new("targetSegment", target_segment)?,
        })
    }

    pub fn get(&self) -> Result<ResourceCollection<Sku>> {
        self.client
            .call(GET_CUSTOMER_SKUS)?
            .path_args([&self.customer_id, &self.product_id])
            .get()
    }
}

/// SKUs of one product for one customer, restricted to a segment.
#[derive(Debug, Clone)]
pub struct CustomerSkuCollectionByTargetSegmentOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    product_id: Identifier,
    target_segment: Identifier,
}

impl CustomerSkuCollectionByTargetSegmentOperations {
    pub fn context(&self) -> (&str, &str, &str) {
        (
            self.customer_id.as_str(),
            self.product_id.as_str(),
            self.target_segment.as_str(),
        )
    }

    pub fn get(&self) -> Result<ResourceCollection<Sku>> {
        self.client
            .call(GET_CUSTOMER_SKUS)?
            .path_args([&self.customer_id, &self.product_id])
            .query("TargetSegment", &self.target_segment)?
            .get()
    }
}

#[derive(Debug, Clone)]
pub struct CustomerSkuOperations {
    client: Arc<PartnerClient>,
    customer_id: Identifier,
    product_id: Identifier,
    sku_id: Identifier,
}

impl CustomerSkuOperations {
    pub fn context(&self) -> (&str, &str, &str) {
        (
            self.customer_id.as_str(),
            self.product_id.as_str(),
            self.sku_id.as_str(),
        )
    }

    pub fn get(&self) -> Result<Sku> {
        self.client
            .call(GET_CUSTOMER_SKU)?
            .path_args([&self.customer_id, &self.product_id, &self.sku_id])
            .get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartnerError;
    use crate::http::HttpMethod;
    use crate::test_support::{client, client_with_table, RecordingTransport};

    const SKUS: &str = r#"{
        "totalCount": 2,
        "items": [
            {"id": "0001", "productId": "prod-2", "title": "Monthly"},
            {"id": "0002", "productId": "prod-2", "title": "Annual"}
        ],
        "attributes": {"objectType": "Collection"}
    }"#;

    #[test]
    fn get_substitutes_customer_and_product() {
        let (client, transport) = client(vec![RecordingTransport::ok(SKUS)]);
        let skus = CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2")
            .unwrap()
            .get()
            .unwrap();
        assert_eq!(skus.total_count, 2);
        assert_eq!(skus.items[1].title, "Annual");

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(
            sent[0].path,
            "http://localhost:3000/v1/customers/cust-1/products/prod-2/skus"
        );
        assert!(sent[0].query.is_empty());
        assert!(sent[0].body.is_none());
    }

    #[test]
    fn repeated_gets_resolve_the_same_path() {
        let (client, transport) =
            client(vec![RecordingTransport::ok(SKUS), RecordingTransport::ok(SKUS)]);
        let ops = CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2").unwrap();
        ops.get().unwrap();
        ops.get().unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].url(), sent[1].url());
    }

    #[test]
    fn blank_identifiers_are_rejected_before_io() {
        let (client, transport) = client(vec![]);
        for (customer, product) in [("", "prod-2"), ("cust-1", ""), ("   ", "prod-2"), ("cust-1", "\t")] {
            let err = CustomerSkuCollectionOperations::new(client.clone(), customer, product)
                .unwrap_err();
            assert!(matches!(err, PartnerError::InvalidArgument(_)), "{customer:?}/{product:?}");
        }
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn by_target_segment_adds_query() {
        let (client, transport) = client(vec![RecordingTransport::ok(SKUS)]);
        CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2")
            .unwrap()
            .by_target_segment("commercial")
            .unwrap()
            .get()
            .unwrap();
        assert_eq!(
            transport.requests()[0].url(),
            "http://localhost:3000/v1/customers/cust-1/products/prod-2/skus?targetSegment=commercial"
        );
    }

    #[test]
    fn segment_key_comes_from_the_route_table() {
        let table = r#"{"apis": {"GetCustomerSkus": {
            "path": "customers/{0}/products/{1}/skus",
            "parameters": {"TargetSegment": "segment"}}}}"#;
        let (client, transport) = client_with_table(table, vec![RecordingTransport::ok(SKUS)]);
        CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2")
            .unwrap()
            .by_target_segment("education")
            .unwrap()
            .get()
            .unwrap();
        assert_eq!(
            transport.requests()[0].query,
            vec![("segment".to_string(), "education".to_string())]
        );
    }

    #[test]
    fn by_id_fetches_one_sku() {
        let (client, transport) =
            client(vec![RecordingTransport::ok(r#"{"id":"0001","productId":"prod-2"}"#)]);
        let ops = CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2")
            .unwrap()
            .by_id("0001")
            .unwrap();
        assert_eq!(ops.context(), ("cust-1", "prod-2", "0001"));
        let sku = ops.get().unwrap();
        assert_eq!(sku.id, "0001");
        assert_eq!(
            transport.requests()[0].path,
            "http://localhost:3000/v1/customers/cust-1/products/prod-2/skus/0001"
        );
    }

    #[test]
    fn blank_sku_id_is_rejected() {
        let (client, _) = client(vec![]);
        let ops = CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2").unwrap();
        assert!(ops.by_id(" ").is_err());
        assert!(ops.by_target_segment("").is_err());
    }

    #[test]
    fn server_errors_surface_with_status() {
        let (client, _) = client(vec![RecordingTransport::status(
            404,
            r#"{"code":"2003","description":"product not found"}"#,
        )]);
        let err = CustomerSkuCollectionOperations::new(client, "cust-1", "prod-2")
            .unwrap()
            .get()
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("product not found"));
    }
}
