//! Request dispatcher shared by every operations type.
//!
//! # Design
//! `PartnerClient` owns the configuration, the route table and the transport,
//! and carries no mutable state between calls. A request goes through three
//! steps:
//!
//! 1. `build_request` turns a method, resolved path, query pairs and an
//!    optional body into an `HttpRequest` (pure).
//! 2. The `Transport` executes it.
//! 3. `parse_response` maps the status and decodes the body (pure).
//!
//! Operations types reach this through `RouteCall`, which looks a route up
//! by name, fills its template and translates logical query names into the
//! keys the service expects.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::PartnerConfig;
use crate::error::{RequestFailure, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::routes::{ApiRoute, RouteRegistry};
use crate::transport::{Transport, UreqTransport};

pub const REQUEST_ID_HEADER: &str = "MS-RequestId";
pub const CORRELATION_ID_HEADER: &str = "MS-CorrelationId";
pub const LOCALE_HEADER: &str = "X-Locale";

/// Blocking client for the partner API.
pub struct PartnerClient {
    config: PartnerConfig,
    routes: Arc<RouteRegistry>,
    transport: Arc<dyn Transport>,
    correlation_id: Uuid,
}

impl PartnerClient {
    /// Client over the built-in route table and the default transport.
    pub fn new(config: PartnerConfig) -> Result<Self> {
        let routes = RouteRegistry::shared()?;
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Ok(Self::with_transport(config, routes, transport))
    }

    pub fn with_transport(
        config: PartnerConfig,
        routes: Arc<RouteRegistry>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            routes,
            transport,
            correlation_id: Uuid::new_v4(),
        }
    }

    pub fn config(&self) -> &PartnerConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Sent on every request made through this client.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Start a request against a named route.
    pub fn call<'a>(&'a self, operation: &'a str) -> Result<RouteCall<'a>> {
        let route = self.routes.route(operation)?;
        Ok(RouteCall {
            client: self,
            operation,
            route,
            path_args: Vec::new(),
            query: Vec::new(),
        })
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<&B>,
    ) -> Result<HttpRequest> {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            (REQUEST_ID_HEADER.to_string(), Uuid::new_v4().to_string()),
            (CORRELATION_ID_HEADER.to_string(), self.correlation_id.to_string()),
            (LOCALE_HEADER.to_string(), self.config.locale.clone()),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];
        if let Some(token) = &self.config.access_token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let body = match body {
            Some(body) => {
                let encoded = serde_json::to_string(body)
                    .map_err(|e| RequestFailure::encoding(e.to_string()))?;
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(encoded)
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            path: format!("{}/{}", self.config.endpoint(), path.trim_start_matches('/')),
            query,
            headers,
            body,
        })
    }

    /// Decode a response into `T`. An empty success body decodes as JSON
    /// `null`, so `()` and `Option<_>` targets accept it.
    pub fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T> {
        if !response.is_success() {
            return Err(RequestFailure::from_status(response.status, &response.body).into());
        }
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body)
            .map_err(|e| RequestFailure::decoding(response.status, e.to_string()).into())
    }

    /// Build, execute and parse one request.
    pub fn send<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(method, path, query, body)?;
        self.execute(&request)
    }

    /// Hand a built request to the transport and parse what comes back.
    pub fn execute<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<T> {
        debug!(
            method = %request.method,
            path = %request.path,
            request_id = request.header(REQUEST_ID_HEADER).unwrap_or_default(),
            "dispatching request"
        );
        let response = self.transport.execute(request)?;
        if !response.is_success() {
            warn!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "request failed"
            );
        }
        self.parse_response(response)
    }
}

impl fmt::Debug for PartnerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerClient")
            .field("endpoint", &self.config.endpoint())
            .field("correlation_id", &self.correlation_id)
            .field("routes", &self.routes.len())
            .finish_non_exhaustive()
    }
}

/// A request against one named route, assembled step by step.
pub struct RouteCall<'a> {
    client: &'a PartnerClient,
    operation: &'a str,
    route: &'a ApiRoute,
    path_args: Vec<String>,
    query: Vec<(String, String)>,
}

impl<'a> RouteCall<'a> {
    /// Values for the template's positional placeholders, in order.
    pub fn path_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.path_args.extend(args.into_iter().map(|a| a.to_string()));
        self
    }

    /// Append a query pair, keyed by the route's mapping for `logical`.
    pub fn query(mut self, logical: &str, value: impl ToString) -> Result<Self> {
        let key = self.route.parameter(self.operation, logical)?;
        self.query.push((key.to_string(), value.to_string()));
        Ok(self)
    }

    pub fn path(&self) -> Result<String> {
        self.route.resolve_path(&self.path_args)
    }

    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        body: Option<&B>,
    ) -> Result<HttpRequest> {
        self.client
            .build_request(method, &self.path()?, self.query.clone(), body)
    }

    pub fn get<T: DeserializeOwned>(self) -> Result<T> {
        self.dispatch::<(), T>(HttpMethod::Get, None)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(self, body: &B) -> Result<T> {
        self.dispatch(HttpMethod::Post, Some(body))
    }

    pub fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(self, body: &B) -> Result<T> {
        self.dispatch(HttpMethod::Patch, Some(body))
    }

    fn dispatch<B: Serialize + ?Sized, T: DeserializeOwned>(
        self,
        method: HttpMethod,
        body: Option<&B>,
    ) -> Result<T> {
        let request = self.build(method, body)?;
        debug!(operation = self.operation, "resolved route");
        self.client.execute(&request)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::PartnerError;
    use crate::test_support::{client, RecordingTransport};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[test]
    fn build_request_sets_standard_headers() {
        let (client, _) = client(vec![]);
        let req = client
            .build_request::<()>(HttpMethod::Get, "customers/c", Vec::new(), None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/v1/customers/c");
        assert_eq!(req.header("Accept"), Some("application/json"));
        assert_eq!(req.header("X-Locale"), Some("en-US"));
        assert_eq!(
            req.header(CORRELATION_ID_HEADER),
            Some(client.correlation_id().to_string().as_str())
        );
        assert!(Uuid::parse_str(req.header(REQUEST_ID_HEADER).unwrap()).is_ok());
        assert!(req.header("Authorization").is_none());
        assert!(req.header("Content-Type").is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn request_ids_are_unique_per_request() {
        let (client, _) = client(vec![]);
        let a = client
            .build_request::<()>(HttpMethod::Get, "x", Vec::new(), None)
            .unwrap();
        let b = client
            .build_request::<()>(HttpMethod::Get, "x", Vec::new(), None)
            .unwrap();
        assert_ne!(a.header(REQUEST_ID_HEADER), b.header(REQUEST_ID_HEADER));
        assert_eq!(a.header(CORRELATION_ID_HEADER), b.header(CORRELATION_ID_HEADER));
    }

    #[test]
    fn bearer_token_and_json_body() {
        let transport = RecordingTransport::new(vec![]);
        let config = PartnerConfig::new("http://localhost:3000").with_access_token("t0k");
        let client = PartnerClient::with_transport(
            config,
            RouteRegistry::shared().unwrap(),
            transport,
        );
        let req = client
            .build_request(
                HttpMethod::Patch,
                "/customers/c/usagebudget",
                Vec::new(),
                Some(&serde_json::json!({"amount": 10})),
            )
            .unwrap();
        assert_eq!(req.path, "http://localhost:3000/v1/customers/c/usagebudget");
        assert_eq!(req.header("Authorization"), Some("Bearer t0k"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["amount"], 10);
    }

    #[test]
    fn parse_response_success() {
        let (client, _) = client(vec![]);
        let thing: Thing = client
            .parse_response(RecordingTransport::ok(r#"{"id":"a"}"#))
            .unwrap();
        assert_eq!(thing, Thing { id: "a".to_string() });
    }

    #[test]
    fn parse_response_empty_body_as_unit() {
        let (client, _) = client(vec![]);
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        let () = client.parse_response(response).unwrap();
    }

    #[test]
    fn parse_response_maps_status() {
        let (client, _) = client(vec![]);
        let err = client
            .parse_response::<Thing>(RecordingTransport::status(404, ""))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_response_bad_json() {
        let (client, _) = client(vec![]);
        let err = client
            .parse_response::<Thing>(RecordingTransport::ok("not json"))
            .unwrap_err();
        assert!(matches!(
            err,
            PartnerError::Request(RequestFailure { status: Some(200), .. })
        ));
    }

    #[test]
    fn route_call_fills_template_and_query_keys() {
        let (client, transport) = client(vec![RecordingTransport::ok(r#"{"id":"x"}"#)]);
        let thing: Thing = client
            .call("GetInvoiceLineItems")
            .unwrap()
            .path_args(["inv-9", "office", "billing_line_items"])
            .query("Size", 25)
            .unwrap()
            .query("Offset", 50)
            .unwrap()
            .get()
            .unwrap();
        assert_eq!(thing.id, "x");

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url(),
            "http://localhost:3000/v1/invoices/inv-9/lineitems/office/billing_line_items?size=25&offset=50"
        );
    }

    #[test]
    fn unknown_route_fails_without_io() {
        let (client, transport) = client(vec![]);
        let err = client.call("GetUnicorns").err().unwrap();
        assert!(matches!(err, PartnerError::UnknownOperation(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn unknown_query_parameter_fails_without_io() {
        let (client, transport) = client(vec![]);
        let err = client
            .call("GetCustomer")
            .unwrap()
            .path_args(["c"])
            .query("Size", 1)
            .err()
            .unwrap();
        assert!(matches!(err, PartnerError::UnknownParameter { .. }));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn transport_failure_is_a_request_failure() {
        let (client, _) = client(vec![]);
        let err = client
            .call("GetCustomer")
            .unwrap()
            .path_args(["c"])
            .get::<Thing>()
            .unwrap_err();
        assert!(matches!(err, PartnerError::Request(RequestFailure { status: None, .. })));
    }

    #[test]
    fn build_previews_the_request_without_io() {
        let (client, transport) = client(vec![]);
        let call = client
            .call("CheckInventory")
            .unwrap()
            .query("Country", "US")
            .unwrap();
        let req = call
            .build(HttpMethod::Post, Some(&serde_json::json!({"targetItems": []})))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url(),
            "http://localhost:3000/v1/extensions/product/checkInventory?country=US"
        );
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn send_accepts_no_content() {
        let (client, transport) = client(vec![RecordingTransport::status(204, "")]);
        client
            .send::<(), ()>(HttpMethod::Get, "customers/c/usagebudget", Vec::new(), None)
            .unwrap();
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, "http://localhost:3000/v1/customers/c/usagebudget");
    }

    #[test]
    fn locale_is_sent_as_configured() {
        let transport = RecordingTransport::new(vec![]);
        let config = PartnerConfig::new("http://localhost:3000").with_locale("fr-FR");
        let client =
            PartnerClient::with_transport(config, RouteRegistry::shared().unwrap(), transport);
        let req = client
            .build_request::<()>(HttpMethod::Get, "invoices", Vec::new(), None)
            .unwrap();
        assert_eq!(req.header(LOCALE_HEADER), Some("fr-FR"));
    }
}
