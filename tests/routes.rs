use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::Level;
use tera::Tera;

use financial_products::gateway::HttpGateway;
use financial_products::message_framework;
use financial_products::models::config::GatewayConfig;
use financial_products::routes::{self, alert_level_to_str};

mod common;

use common::{Reply, SECRET, StubBackend, product};

macro_rules! products_app {
    ($backend:expr) => {{
        let server_config = $backend.server_config();
        let tera = Tera::new(&server_config.templates_dir).unwrap();
        let gateway = HttpGateway::new(&GatewayConfig::from(&server_config)).unwrap();
        test::init_service(
            App::new()
                .wrap(message_framework(SECRET).unwrap())
                .configure(routes::configure)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(gateway))
                .app_data(web::Data::new(server_config)),
        )
        .await
    }};
}

async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn numbered_products(count: usize) -> Vec<serde_json::Value> {
    (1..=count)
        .map(|n| product(&format!("p{n}"), &format!("Nombre-{n}"), "Producto"))
        .collect()
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn index_lists_products_with_display_dates() {
    let backend = StubBackend::start(vec![
        product("trj-1", "Tarjeta", "Crédito"),
        product("cta-2", "Cuenta", "Ahorros"),
    ]);
    let app = products_app!(backend);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Tarjeta"));
    assert!(body.contains("Cuenta"));
    assert!(body.contains("15/01/2024"));
    assert!(body.contains("2 Resultados"));
    assert!(!body.contains("¿Realmente quieres borrar el registro?"));
}

#[actix_web::test]
async fn index_filters_by_search_query() {
    let backend = StubBackend::start(vec![
        product("trj-1", "Tarjeta", "Crédito"),
        product("cta-2", "Cuenta", "Ahorros"),
    ]);
    let app = products_app!(backend);

    let req = test::TestRequest::get().uri("/?q=AHORRO").to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("Cuenta"));
    assert!(!body.contains("Tarjeta"));
    assert!(body.contains("1 Resultados"));
}

#[actix_web::test]
async fn index_shows_requested_page_window() {
    let backend = StubBackend::start(numbered_products(7));
    let app = products_app!(backend);

    let req = test::TestRequest::get()
        .uri("/?page=4&per_page=2")
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("Nombre-7"));
    assert!(!body.contains("Nombre-6"));
    assert!(body.contains("7 Resultados"));
}

#[actix_web::test]
async fn index_defaults_to_five_per_page() {
    let backend = StubBackend::start(numbered_products(7));
    let app = products_app!(backend);

    let body = body_text(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;

    assert!(body.contains("Nombre-5"));
    assert!(!body.contains("Nombre-6"));
}

#[actix_web::test]
async fn index_reports_load_failure() {
    let backend = StubBackend::start(Vec::new());
    *backend.state.list_reply.lock().unwrap() = Some(Reply::Status(500));
    let app = products_app!(backend);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Error al cargar los productos"));
    assert!(!body.contains("<table"));
}

#[actix_web::test]
async fn delete_link_opens_confirmation() {
    let backend = StubBackend::start(vec![product("cta-2", "Cuenta", "Ahorros")]);
    let app = products_app!(backend);

    let req = test::TestRequest::get()
        .uri("/products/cta-2/delete")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("¿Realmente quieres borrar el registro?"));
    assert!(body.contains(r#"action="/products/cta-2/delete""#));
    assert_eq!(backend.state.product_ids(), vec!["cta-2".to_string()]);
}

fn methods(backend: &StubBackend) -> Vec<String> {
    backend
        .state
        .requests()
        .into_iter()
        .map(|r| r.method)
        .collect()
}

#[actix_web::test]
async fn index_survives_largest_page_number() {
    let backend = StubBackend::start(numbered_products(7));
    let app = products_app!(backend);

    let req = test::TestRequest::get()
        .uri("/?page=18446744073709551615&per_page=2")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("No hay productos para mostrar"));
    assert!(body.contains("per_page=2&page=4"));
}

#[actix_web::test]
async fn confirmation_form_carries_list_state() {
    let backend = StubBackend::start(numbered_products(7));
    let app = products_app!(backend);

    let req = test::TestRequest::get()
        .uri("/products/p3/delete?q=nombre&per_page=2&page=2")
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains(r#"<input type="hidden" name="q" value="nombre">"#));
    assert!(body.contains(r#"<input type="hidden" name="per_page" value="2">"#));
    assert!(body.contains(r#"<input type="hidden" name="page" value="2">"#));
}

#[actix_web::test]
async fn confirming_delete_renders_reloaded_list_once() {
    let backend = StubBackend::start(vec![
        product("trj-1", "Tarjeta", "Crédito"),
        product("cta-2", "Cuenta", "Ahorros"),
        product("cta-3", "Cuenta Nómina", "Ahorros"),
    ]);
    let app = products_app!(backend);

    let req = test::TestRequest::post()
        .uri("/products/cta-2/delete")
        .set_form([("q", "ahorros"), ("per_page", "10"), ("page", "1")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Eliminado con éxito"));
    assert!(body.contains("Cuenta Nómina"));
    assert!(!body.contains("Tarjeta"));
    assert!(body.contains(r#"value="ahorros""#));
    assert!(body.contains("1 Resultados"));
    assert_eq!(
        backend.state.product_ids(),
        vec!["trj-1".to_string(), "cta-3".to_string()]
    );
    assert_eq!(methods(&backend), vec!["DELETE".to_string(), "GET".to_string()]);
}

#[actix_web::test]
async fn failed_delete_redirects_back_to_same_list() {
    let backend = StubBackend::start(vec![product("cta-2", "Cuenta", "Ahorros")]);
    *backend.state.delete_reply.lock().unwrap() = Some(Reply::Status(500));
    let app = products_app!(backend);

    let req = test::TestRequest::post()
        .uri("/products/cta-2/delete")
        .set_form([("q", "cuenta ahorros"), ("per_page", "10"), ("page", "1")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, "/?q=cuenta+ahorros&page=1&per_page=10");
    assert_eq!(methods(&backend), vec!["DELETE".to_string()]);

    let follow = test::TestRequest::get().uri(&location).to_request();
    let resp = test::call_service(&app, follow).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(methods(&backend), vec!["DELETE".to_string(), "GET".to_string()]);
    assert_eq!(backend.state.product_ids(), vec!["cta-2".to_string()]);
}

#[actix_web::test]
async fn new_product_form_starts_clean() {
    let backend = StubBackend::start(Vec::new());
    let app = products_app!(backend);

    let req = test::TestRequest::get().uri("/products/new").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("ID del producto:"));
    assert!(body.contains("Regresar"));
    assert!(!body.contains("Reiniciar"));
    assert!(!body.contains("es requerido"));
}

#[actix_web::test]
async fn empty_submit_shows_required_errors_without_calling_backend() {
    let backend = StubBackend::start(Vec::new());
    let app = products_app!(backend);

    let req = test::TestRequest::post()
        .uri("/products/new")
        .set_form([("action", "submit")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("El campo Id es requerido"));
    assert!(body.contains("El campo Date revision es requerido"));
    assert!(body.contains("Reiniciar"));
    assert!(backend.state.requests().is_empty());
}

#[actix_web::test]
async fn valid_submit_creates_product_and_schedules_return() {
    let backend = StubBackend::start(Vec::new());
    let app = products_app!(backend);

    let req = test::TestRequest::post()
        .uri("/products/new")
        .set_form([
            ("id", "trj-oro"),
            ("name", "Tarjeta Oro"),
            ("description", "Tarjeta de crédito"),
            ("logo", "https://img.example.com/oro.png"),
            ("date_release", "2024-03-01"),
            ("date_revision", "2025-03-01"),
            ("action", "submit"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Producto agregado con éxito"));
    assert!(body.contains(r#"http-equiv="refresh""#));
    assert_eq!(backend.state.product_ids(), vec!["trj-oro".to_string()]);
}

#[actix_web::test]
async fn rejected_submit_keeps_values_and_reports_error() {
    let backend = StubBackend::start(Vec::new());
    *backend.state.create_reply.lock().unwrap() = Some(Reply::Status(400));
    let app = products_app!(backend);

    let req = test::TestRequest::post()
        .uri("/products/new")
        .set_form([
            ("id", "trj-oro"),
            ("name", "Tarjeta Oro"),
            ("description", "Tarjeta"),
            ("logo", "logo.png"),
            ("date_release", "2024-03-01"),
            ("date_revision", "2025-03-01"),
            ("action", "submit"),
        ])
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("No se pudo agregar el producto"));
    assert!(body.contains(r#"value="trj-oro""#));
    assert!(!body.contains(r#"http-equiv="refresh""#));
}

#[actix_web::test]
async fn reset_clears_the_form() {
    let backend = StubBackend::start(Vec::new());
    let app = products_app!(backend);

    let req = test::TestRequest::post()
        .uri("/products/new")
        .set_form([("id", "trj-oro"), ("action", "reset")])
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(!body.contains("trj-oro"));
    assert!(body.contains("Regresar"));
    assert!(backend.state.requests().is_empty());
}
