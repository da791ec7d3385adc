//! In-process stand-in for the products backend used by integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, rt, web};
use serde_json::{Value, json};

use financial_products::models::config::{GatewayConfig, ServerConfig};

pub const SECRET: &str =
    "integration-test-secret-integration-test-secret-integration-test-secret";

/// Canned reply overriding the stub's default behaviour for one endpoint.
#[derive(Clone, Debug)]
pub enum Reply {
    Status(u16),
    Body(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub author_id: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct StubState {
    pub products: Mutex<Vec<Value>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub list_reply: Mutex<Option<Reply>>,
    pub create_reply: Mutex<Option<Reply>>,
    pub delete_reply: Mutex<Option<Reply>>,
}

impl StubState {
    fn record(&self, req: &HttpRequest, body: &str) {
        let author_id = req
            .headers()
            .get("authorid")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            author_id,
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn product_ids(&self) -> Vec<String> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p["id"].as_str().map(str::to_string))
            .collect()
    }
}

fn canned(reply: &Reply) -> HttpResponse {
    match reply {
        Reply::Status(code) => {
            let status = actix_web::http::StatusCode::from_u16(*code)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).finish()
        }
        Reply::Body(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(*body),
    }
}

async fn list(req: HttpRequest, state: web::Data<StubState>) -> HttpResponse {
    state.record(&req, "");
    if let Some(reply) = state.list_reply.lock().unwrap().as_ref() {
        return canned(reply);
    }
    HttpResponse::Ok().json(state.products.lock().unwrap().clone())
}

async fn create(req: HttpRequest, body: String, state: web::Data<StubState>) -> HttpResponse {
    state.record(&req, &body);
    if let Some(reply) = state.create_reply.lock().unwrap().as_ref() {
        return canned(reply);
    }
    let product: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.products.lock().unwrap().push(product.clone());
    HttpResponse::Ok().json(json!({ "message": "Product added successfully", "data": product }))
}

async fn delete(
    req: HttpRequest,
    id: web::Path<String>,
    state: web::Data<StubState>,
) -> HttpResponse {
    state.record(&req, "");
    if let Some(reply) = state.delete_reply.lock().unwrap().as_ref() {
        return canned(reply);
    }
    let id = id.into_inner();
    state
        .products
        .lock()
        .unwrap()
        .retain(|p| p["id"].as_str() != Some(id.as_str()));
    HttpResponse::Ok().json(json!({ "message": "Product removed successfully" }))
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    /// Starts the stub on an ephemeral port under the `/api` prefix.
    pub fn start(products: Vec<Value>) -> Self {
        let state = Arc::new(StubState {
            products: Mutex::new(products),
            ..StubState::default()
        });
        let data = web::Data::from(state.clone());

        let server = HttpServer::new(move || {
            App::new().app_data(data.clone()).service(
                web::scope("/api/bp/products")
                    .route("", web::get().to(list))
                    .route("", web::post().to(create))
                    .route("/{id}", web::delete().to(delete)),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        rt::spawn(server.run());

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.base_url.clone(),
            author_id: "10".to_string(),
            timeout_secs: 5,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 0,
            templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*").to_string(),
            secret: SECRET.to_string(),
            backend_url: self.base_url.clone(),
            author_id: "10".to_string(),
            request_timeout_secs: 5,
            redirect_delay_secs: 3,
            notification_ttl_secs: 5,
        }
    }
}

pub fn product(id: &str, name: &str, description: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "logo": format!("https://img.example.com/{id}.png"),
        "date_release": "2024-01-15T00:00:00.000+00:00",
        "date_revision": "2025-01-15T00:00:00.000+00:00",
    })
}
