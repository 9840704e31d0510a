//! Invoice entities and the enums that address line items.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collection::{ResourceAttributes, ResourceLinks};

/// Source of billing data. `None` is a placeholder the service never accepts
/// in a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingProvider {
    #[default]
    None,
    Azure,
    Office,
    OneTime,
    Marketplace,
    All,
}

impl BillingProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            BillingProvider::None => "none",
            BillingProvider::Azure => "azure",
            BillingProvider::Office => "office",
            BillingProvider::OneTime => "one_time",
            BillingProvider::Marketplace => "marketplace",
            BillingProvider::All => "all",
        }
    }
}

impl fmt::Display for BillingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceLineItemType {
    #[default]
    None,
    UsageLineItems,
    BillingLineItems,
}

impl InvoiceLineItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceLineItemType::None => "none",
            InvoiceLineItemType::UsageLineItems => "usage_line_items",
            InvoiceLineItemType::BillingLineItems => "billing_line_items",
        }
    }
}

impl fmt::Display for InvoiceLineItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period_end_date: Option<String>,
    #[serde(default)]
    pub total_charges: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_download_link: Option<String>,
    #[serde(default)]
    pub invoice_details: Vec<InvoiceDetail>,
    #[serde(default)]
    pub links: ResourceLinks,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

/// One (provider, line item type) pair an invoice has line items for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    pub billing_provider: BillingProvider,
    pub invoice_line_item_type: InvoiceLineItemType,
    #[serde(default)]
    pub links: ResourceLinks,
}

/// A line item. The set of columns depends on the provider and type, so
/// anything beyond the two discriminators is kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    #[serde(default)]
    pub billing_provider: BillingProvider,
    #[serde(default)]
    pub invoice_line_item_type: InvoiceLineItemType,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl InvoiceLineItem {
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.details.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(serde_json::Value::as_str)
    }
}
