//! Blocking client SDK for the partner-management REST API.
//!
//! # Overview
//! Customers, products, SKUs, invoices, usage budgets and service requests
//! are reached by navigating from `PartnerOperations`. Every fetch or update
//! is one HTTP request: the operation's context fills a named route template,
//! the shared `PartnerClient` sends it, and the response decodes into a typed
//! entity or a `ResourceCollection`.
//!
//! # Design
//! - Route templates and query keys live in a JSON table compiled into the
//!   crate (`routes`), parsed once per process.
//! - `PartnerClient` splits each call into a pure `build_request`, a
//!   `Transport::execute`, and a pure `parse_response`.
//! - Operations types validate their identifiers on construction and hold no
//!   mutable state, so they are `Send + Sync` and cheap to clone.
//!
//! ```no_run
//! use partnercenter_core::{PartnerConfig, PartnerOperations};
//!
//! # fn main() -> partnercenter_core::Result<()> {
//! let partner = PartnerOperations::from_config(PartnerConfig::from_env()?)?;
//! let skus = partner
//!     .customers()
//!     .by_id("cust-1")?
//!     .products()
//!     .by_id("prod-2")?
//!     .skus()
//!     .get()?;
//! for sku in skus {
//!     println!("{} {}", sku.id, sku.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod models;
pub mod operations;
pub mod routes;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::{PartnerClient, RouteCall};
pub use config::PartnerConfig;
pub use context::Identifier;
pub use error::{PartnerError, RequestFailure, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::ResourceCollection;
pub use operations::PartnerOperations;
pub use routes::{ApiRoute, RouteRegistry};
pub use transport::{Transport, UreqTransport};
