//! Wire entities exchanged with the partner API.
//!
//! # Design
//! Entities are plain serde records with camelCase JSON names. Fields the
//! service may omit are `Option` or default to empty, so a sparse response
//! still decodes. Entities have no identity beyond field equality and are
//! replaced wholesale on every fetch.

pub mod collection;
pub mod customers;
pub mod invoices;
pub mod products;
pub mod service_requests;
pub mod usage;

pub use collection::{Link, ResourceAttributes, ResourceCollection, ResourceLinks};
pub use customers::{Customer, CustomerCompanyProfile};
pub use invoices::{BillingProvider, Invoice, InvoiceDetail, InvoiceLineItem, InvoiceLineItemType};
pub use products::{
    InventoryCheckRequest, InventoryItem, InventoryRestriction, ItemType, Product, Sku,
};
pub use service_requests::{
    FieldFilterOperation, ServiceRequest, ServiceRequestFilter, ServiceRequestNote,
    ServiceRequestSearchField, ServiceRequestSeverity, ServiceRequestStatus,
};
pub use usage::SpendingBudget;
