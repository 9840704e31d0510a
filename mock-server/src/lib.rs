//! In-memory stand-in for the partner API, serving the routes the SDK's
//! built-in route table points at under `/v1`.
//!
//! State is seeded with one customer (`cust-1`), a handful of products and
//! SKUs, one invoice with billing line items, a usage budget and two service
//! requests. Paging parameters are range-checked here, the way the real
//! service does it, so clients can observe server-side rejection.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub company_name: String,
    pub domain: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub target_view: String,
    pub target_segment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_scope: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub target_segment: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpendingBudget {
    pub amount: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub total_charges: f64,
    pub currency_code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub billing_provider: String,
    pub invoice_line_item_type: String,
    pub order_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub created_by_name: String,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(skip)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestUpdate {
    pub status: Option<String>,
    pub new_note: Option<NewNote>,
}

#[derive(Deserialize)]
pub struct NewNote {
    pub text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCheck {
    pub target_items: Vec<InventoryTarget>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTarget {
    pub product_id: String,
    pub sku_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Filter {
    field: String,
    value: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pub customers: HashMap<String, Customer>,
    pub products: HashMap<String, Vec<Product>>,
    pub skus: HashMap<(String, String), Vec<Sku>>,
    pub budgets: HashMap<String, SpendingBudget>,
    pub invoices: Vec<Invoice>,
    pub line_items: HashMap<String, Vec<LineItem>>,
    pub service_requests: Vec<ServiceRequest>,
    pub available_countries: Vec<String>,
}

impl Store {
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.customers.insert(
            "cust-1".to_string(),
            Customer {
                id: "cust-1".to_string(),
                company_name: "Contoso".to_string(),
                domain: "contoso.example".to_string(),
            },
        );
        store.products.insert(
            "cust-1".to_string(),
            vec![
                Product {
                    id: "DZH318Z0BQ3Q".to_string(),
                    title: "Reserved Virtual Machine Instance".to_string(),
                    target_view: "Azure".to_string(),
                    target_segment: "commercial".to_string(),
                    reservation_scope: Some("AzurePlan".to_string()),
                },
                Product {
                    id: "DZH318Z0BQ4P".to_string(),
                    title: "Reserved SQL Database".to_string(),
                    target_view: "Azure".to_string(),
                    target_segment: "education".to_string(),
                    reservation_scope: None,
                },
                Product {
                    id: "CFQ7TTC0LH18".to_string(),
                    title: "Microsoft 365 Business Basic".to_string(),
                    target_view: "OnlineServices".to_string(),
                    target_segment: "commercial".to_string(),
                    reservation_scope: None,
                },
            ],
        );
        store.skus.insert(
            ("cust-1".to_string(), "DZH318Z0BQ3Q".to_string()),
            vec![
                Sku {
                    id: "0001".to_string(),
                    product_id: "DZH318Z0BQ3Q".to_string(),
                    title: "Standard_D2 1 year".to_string(),
                    target_segment: "commercial".to_string(),
                },
                Sku {
                    id: "0002".to_string(),
                    product_id: "DZH318Z0BQ3Q".to_string(),
                    title: "Standard_D2 3 years".to_string(),
                    target_segment: "education".to_string(),
                },
            ],
        );
        store
            .budgets
            .insert("cust-1".to_string(), SpendingBudget { amount: Some(100.0) });
        store.invoices = vec![
            Invoice {
                id: "inv-9".to_string(),
                total_charges: 42.5,
                currency_code: "USD".to_string(),
            },
            Invoice {
                id: "inv-10".to_string(),
                total_charges: 7.0,
                currency_code: "USD".to_string(),
            },
        ];
        store.line_items.insert(
            "inv-9".to_string(),
            (1..=3)
                .map(|n| LineItem {
                    billing_provider: "office".to_string(),
                    invoice_line_item_type: "billing_line_items".to_string(),
                    order_id: format!("order-{n}"),
                    quantity: n,
                })
                .collect(),
        );
        store.service_requests = vec![
            ServiceRequest {
                id: "sr-1".to_string(),
                title: "Portal access".to_string(),
                status: "open".to_string(),
                customer_id: None,
                notes: Vec::new(),
            },
            ServiceRequest {
                id: "sr-2".to_string(),
                title: "Billing question".to_string(),
                status: "closed".to_string(),
                customer_id: Some("cust-1".to_string()),
                notes: Vec::new(),
            },
        ];
        store.available_countries = vec!["US".to_string(), "CA".to_string()];
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/v1/customers/{customer_id}", get(get_customer))
        .route("/v1/customers/{customer_id}/products", get(list_products))
        .route("/v1/customers/{customer_id}/products/{product_id}", get(get_product))
        .route("/v1/customers/{customer_id}/products/{product_id}/skus", get(list_skus))
        .route(
            "/v1/customers/{customer_id}/products/{product_id}/skus/{sku_id}",
            get(get_sku),
        )
        .route(
            "/v1/customers/{customer_id}/usagebudget",
            get(get_budget).patch(patch_budget),
        )
        .route(
            "/v1/customers/{customer_id}/servicerequests",
            get(list_customer_service_requests),
        )
        .route("/v1/invoices", get(list_invoices))
        .route("/v1/invoices/{invoice_id}", get(get_invoice))
        .route(
            "/v1/invoices/{invoice_id}/lineitems/{provider}/{item_type}",
            get(list_line_items),
        )
        .route("/v1/extensions/product/checkInventory", post(check_inventory))
        .route("/v1/servicerequests", get(list_service_requests))
        .route(
            "/v1/servicerequests/{id}",
            get(get_service_request).patch(patch_service_request),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, code: u32, description: impl Into<String>) -> ApiError {
    (
        status,
        Json(json!({ "code": code, "description": description.into() })),
    )
}

fn not_found(what: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, 600008, format!("{what} was not found"))
}

fn collection<T: Serialize>(items: Vec<T>, total: usize, next: Option<String>) -> Json<Value> {
    let mut body = json!({
        "totalCount": total,
        "items": items,
        "links": {},
        "attributes": { "objectType": "Collection" }
    });
    if let Some(uri) = next {
        body["links"]["next"] = json!({ "uri": uri, "method": "GET", "headers": [] });
    }
    Json(body)
}

/// Apply `size` / `offset` query values; rejects what the real service rejects.
fn page<T: Clone>(
    items: &[T],
    params: &HashMap<String, String>,
    base: &str,
) -> Result<(Vec<T>, Option<String>), ApiError> {
    let parse = |key: &str, default: i64| -> Result<i64, ApiError> {
        match params.get(key) {
            Some(raw) => raw.parse().map_err(|_| {
                error(StatusCode::BAD_REQUEST, 400001, format!("{key} must be an integer"))
            }),
            None => Ok(default),
        }
    };
    let size = parse("size", items.len().max(1) as i64)?;
    let offset = parse("offset", 0)?;
    if size <= 0 || offset < 0 {
        return Err(error(
            StatusCode::BAD_REQUEST,
            400002,
            "size must be positive and offset must not be negative",
        ));
    }
    let start = (offset as usize).min(items.len());
    let end = start.saturating_add(size as usize).min(items.len());
    let next = (end < items.len()).then(|| format!("{base}?size={size}&offset={end}"));
    Ok((items[start..end].to_vec(), next))
}

async fn get_customer(
    State(db): State<Db>,
    Path(customer_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let customer = store.customers.get(&customer_id).ok_or_else(|| not_found("customer"))?;
    Ok(Json(json!({
        "id": customer.id,
        "companyProfile": { "companyName": customer.company_name, "domain": customer.domain },
        "attributes": { "objectType": "Customer" }
    })))
}

async fn list_products(
    State(db): State<Db>,
    Path(customer_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let products = store.products.get(&customer_id).ok_or_else(|| not_found("customer"))?;
    let view = params
        .get("targetView")
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, 400003, "targetView is required"))?;
    let matching: Vec<Product> = products
        .iter()
        .filter(|p| &p.target_view == view)
        .filter(|p| params.get("targetSegment").is_none_or(|s| &p.target_segment == s))
        .filter(|p| {
            params
                .get("reservationScope")
                .is_none_or(|s| p.reservation_scope.as_ref() == Some(s))
        })
        .cloned()
        .collect();
    let total = matching.len();
    Ok(collection(matching, total, None))
}

async fn get_product(
    State(db): State<Db>,
    Path((customer_id, product_id)): Path<(String, String)>,
) -> Result<Json<Product>, ApiError> {
    let store = db.read().await;
    store
        .products
        .get(&customer_id)
        .and_then(|products| products.iter().find(|p| p.id == product_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("product"))
}

async fn list_skus(
    State(db): State<Db>,
    Path((customer_id, product_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let skus = store
        .skus
        .get(&(customer_id, product_id))
        .ok_or_else(|| not_found("product"))?;
    let matching: Vec<Sku> = skus
        .iter()
        .filter(|s| params.get("targetSegment").is_none_or(|seg| &s.target_segment == seg))
        .cloned()
        .collect();
    let total = matching.len();
    Ok(collection(matching, total, None))
}

async fn get_sku(
    State(db): State<Db>,
    Path((customer_id, product_id, sku_id)): Path<(String, String, String)>,
) -> Result<Json<Sku>, ApiError> {
    let store = db.read().await;
    store
        .skus
        .get(&(customer_id, product_id))
        .and_then(|skus| skus.iter().find(|s| s.id == sku_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("sku"))
}

async fn get_budget(
    State(db): State<Db>,
    Path(customer_id): Path<String>,
) -> Result<Json<SpendingBudget>, ApiError> {
    let store = db.read().await;
    if !store.customers.contains_key(&customer_id) {
        return Err(not_found("customer"));
    }
    Ok(Json(store.budgets.get(&customer_id).cloned().unwrap_or_default()))
}

async fn patch_budget(
    State(db): State<Db>,
    Path(customer_id): Path<String>,
    Json(budget): Json<SpendingBudget>,
) -> Result<Json<SpendingBudget>, ApiError> {
    let mut store = db.write().await;
    if !store.customers.contains_key(&customer_id) {
        return Err(not_found("customer"));
    }
    info!(%customer_id, amount = ?budget.amount, "usage budget updated");
    store.budgets.insert(customer_id, budget.clone());
    Ok(Json(budget))
}

async fn list_invoices(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let (items, next) = page(&store.invoices, &params, "/v1/invoices")?;
    Ok(collection(items, store.invoices.len(), next))
}

async fn get_invoice(
    State(db): State<Db>,
    Path(invoice_id): Path<String>,
) -> Result<Json<Invoice>, ApiError> {
    let store = db.read().await;
    store
        .invoices
        .iter()
        .find(|i| i.id == invoice_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("invoice"))
}

async fn list_line_items(
    State(db): State<Db>,
    Path((invoice_id, provider, item_type)): Path<(String, String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let items = store.line_items.get(&invoice_id).ok_or_else(|| not_found("invoice"))?;
    let matching: Vec<LineItem> = items
        .iter()
        .filter(|li| li.billing_provider == provider && li.invoice_line_item_type == item_type)
        .cloned()
        .collect();
    let base = format!("/v1/invoices/{invoice_id}/lineitems/{provider}/{item_type}");
    let (page_items, next) = page(&matching, &params, &base)?;
    debug!(%invoice_id, returned = page_items.len(), "line items page");
    Ok(collection(page_items, matching.len(), next))
}

async fn check_inventory(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    Json(check): Json<InventoryCheck>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let store = db.read().await;
    let country = params
        .get("country")
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, 400004, "country is required"))?;
    let available = store.available_countries.iter().any(|c| c == country);
    let results = check
        .target_items
        .into_iter()
        .map(|item| {
            let mut result = json!({ "productId": item.product_id });
            if let Some(sku_id) = item.sku_id {
                result["skuId"] = json!(sku_id);
            }
            if !available {
                result["restrictions"] = json!([{
                    "reasonCode": "NotAvailableInCountry",
                    "description": format!("not sold in {country}"),
                    "properties": {}
                }]);
            }
            result
        })
        .collect();
    Ok(Json(results))
}

fn filtered(
    requests: impl Iterator<Item = ServiceRequest>,
    params: &HashMap<String, String>,
) -> Result<Vec<ServiceRequest>, ApiError> {
    let filter: Option<Filter> = match params.get("filter") {
        Some(raw) => Some(serde_json::from_str(raw).map_err(|_| {
            error(StatusCode::BAD_REQUEST, 400005, "filter is not valid JSON")
        })?),
        None => None,
    };
    if let Some(f) = &filter {
        if f.field != "Status" {
            return Err(error(
                StatusCode::BAD_REQUEST,
                400006,
                format!("cannot filter on {}", f.field),
            ));
        }
    }
    Ok(requests
        .filter(|sr| filter.as_ref().is_none_or(|f| sr.status == f.value))
        .collect())
}

async fn list_service_requests(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let matching = filtered(store.service_requests.iter().cloned(), &params)?;
    let total = matching.len();
    Ok(collection(matching, total, None))
}

async fn list_customer_service_requests(
    State(db): State<Db>,
    Path(customer_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    if !store.customers.contains_key(&customer_id) {
        return Err(not_found("customer"));
    }
    let scoped = store
        .service_requests
        .iter()
        .filter(|sr| sr.customer_id.as_deref() == Some(customer_id.as_str()))
        .cloned();
    let matching = filtered(scoped, &params)?;
    let total = matching.len();
    Ok(collection(matching, total, None))
}

async fn get_service_request(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<ServiceRequest>, ApiError> {
    let store = db.read().await;
    store
        .service_requests
        .iter()
        .find(|sr| sr.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("service request"))
}

async fn patch_service_request(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(update): Json<ServiceRequestUpdate>,
) -> Result<Json<ServiceRequest>, ApiError> {
    let mut store = db.write().await;
    let sr = store
        .service_requests
        .iter_mut()
        .find(|sr| sr.id == id)
        .ok_or_else(|| not_found("service request"))?;
    if let Some(status) = update.status.filter(|s| s != "none") {
        sr.status = status;
    }
    if let Some(note) = update.new_note {
        sr.notes.push(Note {
            created_by_name: format!("partner-{}", Uuid::new_v4().simple()),
            text: note.text,
        });
    }
    Ok(Json(sr.clone()))
}
