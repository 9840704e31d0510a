//! In-memory transport used by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::PartnerClient;
use crate::config::PartnerConfig;
use crate::error::RequestFailure;
use crate::http::{HttpRequest, HttpResponse};
use crate::routes::RouteRegistry;
use crate::transport::Transport;

/// Replays queued responses and records every request it sees. Runs out of
/// responses as a transport failure.
pub(crate) struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn ok(body: &str) -> HttpResponse {
        Self::status(200, body)
    }

    pub(crate) fn status(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RequestFailure::transport("no response queued"))
    }
}

pub(crate) fn client(
    responses: Vec<HttpResponse>,
) -> (Arc<PartnerClient>, Arc<RecordingTransport>) {
    client_with_routes(RouteRegistry::shared().unwrap(), responses)
}

/// Client over a caller-supplied route table in the usual `{"apis": ..}` shape.
pub(crate) fn client_with_table(
    table: &str,
    responses: Vec<HttpResponse>,
) -> (Arc<PartnerClient>, Arc<RecordingTransport>) {
    client_with_routes(Arc::new(RouteRegistry::from_json_str(table).unwrap()), responses)
}

fn client_with_routes(
    routes: Arc<RouteRegistry>,
    responses: Vec<HttpResponse>,
) -> (Arc<PartnerClient>, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new(responses);
    let client = PartnerClient::with_transport(
        PartnerConfig::new("http://localhost:3000"),
        routes,
        transport.clone(),
    );
    (Arc::new(client), transport)
}
