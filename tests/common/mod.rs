#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use url::Url;

use base_wallet_stats::config::SourcesConfig;

pub const TARGET: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0beb0";
pub const OTHER: &str = "0x00000000000000000000000000000000000000aa";

pub async fn spawn(app: Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);
    let server = axum::serve(listener, app);
    let handle = tokio::spawn(async move {
        let _ = server.await;
    });
    (base_url, handle)
}

/// A url nothing is listening on.
pub async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

#[derive(Debug, Clone)]
pub enum RpcReply {
    Count(&'static str),
    RpcError,
    Unavailable,
    /// Error status with a well-formed JSON-RPC body.
    StatusWithResult(u16, &'static str),
}

pub struct FakeRpc {
    reply: RpcReply,
    hits: AtomicUsize,
}

impl FakeRpc {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn rpc_handler(State(fake): State<Arc<FakeRpc>>, Json(req): Json<Value>) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    assert_eq!(req["method"], "eth_getTransactionCount");
    assert_eq!(req["params"][1], "latest");
    let id = req.get("id").cloned().unwrap_or(json!(1));
    match fake.reply {
        RpcReply::Count(hex) => Json(json!({"jsonrpc": "2.0", "id": id, "result": hex})).into_response(),
        RpcReply::RpcError => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32005, "message": "request limit exceeded"}
        }))
        .into_response(),
        RpcReply::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response(),
        RpcReply::StatusWithResult(code, hex) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({"jsonrpc": "2.0", "id": id, "result": hex})),
        )
            .into_response(),
    }
}

pub async fn spawn_rpc(reply: RpcReply) -> (Url, Arc<FakeRpc>) {
    let fake = Arc::new(FakeRpc {
        reply,
        hits: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/", post(rpc_handler))
        .with_state(fake.clone());
    let (base_url, _handle) = spawn(app).await;
    (Url::parse(&base_url).unwrap(), fake)
}

#[derive(Debug, Clone)]
pub enum PageReply {
    Body(Value),
    Status(u16),
}

#[derive(Default)]
pub struct FakeExplorer {
    /// Reply to the ascending, single-record query.
    pub first: Option<PageReply>,
    /// Replies to descending queries, keyed by page number.
    pub pages: HashMap<u32, PageReply>,
    pub requests: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeExplorer {
    pub fn desc_pages_requested(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.get("sort").map(String::as_str) == Some("desc"))
            .filter_map(|q| q.get("page").and_then(|p| p.parse().ok()))
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn explorer_handler(
    State(fake): State<Arc<FakeExplorer>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    fake.requests.lock().unwrap().push(query.clone());
    assert_eq!(query.get("module").map(String::as_str), Some("account"));
    assert_eq!(query.get("action").map(String::as_str), Some("txlist"));

    let reply = match query.get("sort").map(String::as_str) {
        Some("asc") => fake.first.clone(),
        _ => query
            .get("page")
            .and_then(|p| p.parse::<u32>().ok())
            .and_then(|page| fake.pages.get(&page).cloned()),
    };

    match reply {
        Some(PageReply::Body(body)) => Json(body).into_response(),
        Some(PageReply::Status(code)) => {
            (StatusCode::from_u16(code).unwrap(), "explorer error").into_response()
        }
        None => Json(no_transactions()).into_response(),
    }
}

pub async fn spawn_explorer(fake: FakeExplorer) -> (Url, Arc<FakeExplorer>) {
    let fake = Arc::new(fake);
    let app = Router::new()
        .route("/api", get(explorer_handler))
        .with_state(fake.clone());
    let (base_url, _handle) = spawn(app).await;
    (Url::parse(&format!("{}/api", base_url)).unwrap(), fake)
}

pub fn tx(from: &str, to: &str, gas_used: u64, gas_price: u64) -> Value {
    json!({
        "timeStamp": "1700000000",
        "from": from,
        "to": to,
        "gasUsed": gas_used.to_string(),
        "gasPrice": gas_price.to_string(),
    })
}

pub fn ok_page(txs: Vec<Value>) -> PageReply {
    PageReply::Body(json!({"status": "1", "message": "OK", "result": txs}))
}

pub fn no_transactions() -> Value {
    json!({"status": "0", "message": "No transactions found", "result": []})
}

/// 1000 records: 500 sent by TARGET at 1e15 wei each, 500 received with
/// larger fees paid by someone else.
pub fn full_page() -> PageReply {
    let txs = (0..1000)
        .map(|i| {
            if i % 2 == 0 {
                tx(TARGET, OTHER, 100_000, 10_000_000_000)
            } else {
                tx(OTHER, TARGET, 900_000, 50_000_000_000)
            }
        })
        .collect();
    ok_page(txs)
}

pub fn sources(rpc_urls: Vec<Url>, explorer_api_url: Url) -> SourcesConfig {
    SourcesConfig {
        rpc_urls,
        explorer_api_url,
        request_timeout: Duration::from_secs(5),
        ..SourcesConfig::default()
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
