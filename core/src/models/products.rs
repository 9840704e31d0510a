//! Catalog entities: products, SKUs and inventory checks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::collection::{ResourceAttributes, ResourceLinks};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ItemType>,
    #[serde(default)]
    pub is_microsoft_product: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_name: Option<String>,
    #[serde(default)]
    pub links: ResourceLinks,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

/// Product classification; nests one level per sub type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemType {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<Box<ItemType>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub minimum_quantity: i32,
    #[serde(default)]
    pub maximum_quantity: i32,
    #[serde(default)]
    pub is_trial: bool,
    #[serde(default)]
    pub supported_billing_cycles: Vec<String>,
    #[serde(default)]
    pub purchase_prerequisites: Vec<String>,
    #[serde(default)]
    pub inventory_variables: Vec<String>,
    #[serde(default)]
    pub provisioning_variables: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    /// Product-specific attributes with no fixed schema.
    #[serde(default)]
    pub dynamic_attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub links: ResourceLinks,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

/// Body of an inventory check for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCheckRequest {
    pub target_items: Vec<InventoryItem>,
    /// Extra inputs some products need, e.g. `customerId` or `azureSubscriptionId`.
    #[serde(default)]
    pub inventory_context: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<InventoryRestriction>,
}

impl InventoryItem {
    pub fn new(product_id: impl Into<String>, sku_id: Option<String>) -> Self {
        Self {
            product_id: product_id.into(),
            sku_id,
            ..Self::default()
        }
    }

    pub fn is_restricted(&self) -> bool {
        !self.restrictions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRestriction {
    pub reason_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_decodes_with_dynamic_attributes() {
        let sku: Sku = serde_json::from_str(
            r#"{
                "id": "0001",
                "productId": "DZH318Z0BQ3Q",
                "title": "Reserved VM",
                "minimumQuantity": 1,
                "maximumQuantity": 300,
                "supportedBillingCycles": ["monthly", "annual"],
                "dynamicAttributes": {"armSkuName": "Standard_D2", "duration": "P1Y"}
            }"#,
        )
        .unwrap();
        assert_eq!(sku.product_id, "DZH318Z0BQ3Q");
        assert_eq!(sku.maximum_quantity, 300);
        assert_eq!(sku.supported_billing_cycles, ["monthly", "annual"]);
        assert_eq!(sku.dynamic_attributes["armSkuName"], "Standard_D2");
        assert!(!sku.is_trial);
    }

    #[test]
    fn product_type_nests() {
        let product: Product = serde_json::from_str(
            r#"{"id":"P1","title":"VM","productType":
                {"id":"Azure","displayName":"Azure","subType":{"id":"VirtualMachines","displayName":"VMs"}}}"#,
        )
        .unwrap();
        let kind = product.product_type.unwrap();
        assert_eq!(kind.sub_type.unwrap().id, "VirtualMachines");
    }

    #[test]
    fn inventory_request_serializes_camel_case() {
        let request = InventoryCheckRequest {
            target_items: vec![InventoryItem::new("DZH318Z0BQ3Q", Some("0001".to_string()))],
            inventory_context: HashMap::from([("customerId".to_string(), "c1".to_string())]),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["targetItems"][0]["productId"], "DZH318Z0BQ3Q");
        assert_eq!(json["targetItems"][0]["skuId"], "0001");
        assert!(json["targetItems"][0].get("restrictions").is_none());
        assert_eq!(json["inventoryContext"]["customerId"], "c1");
    }

    #[test]
    fn restricted_items() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"productId":"P","restrictions":[{"reasonCode":"NotAvailable","description":"x"}]}"#,
        )
        .unwrap();
        assert!(item.is_restricted());
        assert_eq!(item.restrictions[0].reason_code, "NotAvailable");
    }
}
