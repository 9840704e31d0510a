//! Invoices and their line items.

use std::sync::Arc;

use crate::client::PartnerClient;
use crate::context::Identifier;
use crate::error::{PartnerError, Result};
use crate::models::{BillingProvider, Invoice, InvoiceLineItem, InvoiceLineItemType, ResourceCollection};

const GET_INVOICES: &str = "GetInvoices";
const GET_INVOICE: &str = "GetInvoice";
const GET_INVOICE_LINE_ITEMS: &str = "GetInvoiceLineItems";

#[derive(Debug, Clone)]
pub struct InvoiceCollectionOperations {
    client: Arc<PartnerClient>,
}

impl InvoiceCollectionOperations {
    pub fn new(client: Arc<PartnerClient>) -> Self {
        Self { client }
    }

    pub fn get(&self) -> Result<ResourceCollection<Invoice>> {
        self.client.call(GET_INVOICES)?.get()
    }

    /// One page of invoices. `size` and `offset` are passed through as given.
    pub fn get_page(&self, size: i32, offset: i32) -> Result<ResourceCollection<Invoice>> {
        self.client
            .call(GET_INVOICES)?
            .query("Size", size)?
            .query("Offset", offset)?
            .get()
    }

    pub fn by_id(&self, invoice_id: impl Into<String>) -> Result<InvoiceOperations> {
        Ok(InvoiceOperations {
            client: self.client.clone(),
            invoice_id: Identifier::new("invoiceId", invoice_id)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceOperations {
    client: Arc<PartnerClient>,
    invoice_id: Identifier,
}

impl InvoiceOperations {
    pub fn context(&self) -> &str {
        self.invoice_id.as_str()
    }

    pub fn get(&self) -> Result<Invoice> {
        self.client
            .call(GET_INVOICE)?
            .path_args([&self.invoice_id])
            .get()
    }

    pub fn line_items(
        &self,
        billing_provider: BillingProvider,
        line_item_type: InvoiceLineItemType,
    ) -> Result<InvoiceLineItemCollectionOperations> {
        InvoiceLineItemCollectionOperations::from_parts(
            self.client.clone(),
            self.invoice_id.clone(),
            billing_provider,
            line_item_type,
        )
    }
}

/// Line items of one invoice for one billing provider and line item type.
#[derive(Debug, Clone)]
pub struct InvoiceLineItemCollectionOperations {
    client: Arc<PartnerClient>,
    invoice_id: Identifier,
    billing_provider: BillingProvider,
    line_item_type: InvoiceLineItemType,
}

impl InvoiceLineItemCollectionOperations {
    /// Fails on a blank invoice id, or when the provider or type is `None`.
    pub fn new(
        client: Arc<PartnerClient>,
        invoice_id: impl Into<String>,
        billing_provider: BillingProvider,
        line_item_type: InvoiceLineItemType,
    ) -> Result<Self> {
        Self::from_parts(
            client,
            Identifier::new("invoiceId", invoice_id)?,
            billing_provider,
            line_item_type,
        )
    }

    fn from_parts(
        client: Arc<PartnerClient>,
        invoice_id: Identifier,
        billing_provider: BillingProvider,
        line_item_type: InvoiceLineItemType,
    ) -> Result<Self> {
        if billing_provider == BillingProvider::None {
            return Err(PartnerError::invalid_argument("the billing provider is not valid"));
        }
        if line_item_type == InvoiceLineItemType::None {
            return Err(PartnerError::invalid_argument(
                "the invoice line item type is not valid",
            ));
        }
        Ok(Self {
            client,
            invoice_id,
            billing_provider,
            line_item_type,
        })
    }

    pub fn context(&self) -> (&str, BillingProvider, InvoiceLineItemType) {
        (self.invoice_id.as_str(), self.billing_provider, self.line_item_type)
    }

    pub fn get(&self) -> Result<ResourceCollection<InvoiceLineItem>> {
        self.client
            .call(GET_INVOICE_LINE_ITEMS)?
            .path_args([
                self.invoice_id.as_str(),
                self.billing_provider.as_str(),
                self.line_item_type.as_str(),
            ])
            .get()
    }

    /// One page of line items. `size` and `offset` are passed through as
    /// given; the service decides what is in range.
    pub fn get_page(&self, size: i32, offset: i32) -> Result<ResourceCollection<InvoiceLineItem>> {
        self.client
            .call(GET_INVOICE_LINE_ITEMS)?
            .path_args([
                self.invoice_id.as_str(),
                self.billing_provider.as_str(),
                self.line_item_type.as_str(),
            ])
            .query("Size", size)?
            .query("Offset", offset)?
            .get()
    }
}
