use std::net::SocketAddr;

use configs::{AppConfig, DatabaseConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::{routes, startup};

struct TestApp {
    base_url: String,
}

fn sqlite_config(backend: StorageBackend) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = backend;
    cfg.database = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    cfg
}

async fn start_server_with(cfg: AppConfig) -> anyhow::Result<TestApp> {
    let state = startup::build_state(&cfg).await?;
    let app = routes::build_router(state, startup::build_cors(&cfg.cors)?);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// Seeded SQLite-backed server.
async fn start_server() -> anyhow::Result<TestApp> {
    start_server_with(sqlite_config(StorageBackend::Database)).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn monitor() -> Value {
    json!({"id": 5, "name": "Monitor", "description": "4K", "price": 249.99, "quantity": 10})
}

#[tokio::test]
async fn e2e_greeting_and_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!("yay !!"));

    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_list_seeded_products() -> anyhow::Result<()> {
    let app = start_server().await?;
    for path in ["/products/", "/products"] {
        let res = client().get(format!("{}{}", app.base_url, path)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body = res.json::<Vec<Value>>().await?;
        assert_eq!(body.len(), 4);
        assert_eq!(body[0]["name"], "Phone");
        assert_eq!(body[3]["name"], "Table");
    }

    let res = client().get(format!("{}/products/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({"id": 3, "name": "Pen", "description": "A blue ink pen", "price": 1.99, "quantity": 100})
    );
    Ok(())
}

#[tokio::test]
async fn e2e_get_missing_product() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/products/42", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"detail": "Product not found"}));

    let res = client().get(format!("{}/products/abc", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_create_then_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/products/", app.base_url)).json(&monitor()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, monitor());

    let res = c.get(format!("{}/products/5", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, monitor());

    let res = c.delete(format!("{}/products/5", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "product deleted", "product": monitor()}));

    let res = c.get(format!("{}/products/5", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/products/5", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"message": "no product with this id"}));

    let res = c.get(format!("{}/products/", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_create_conflicts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let body = json!({"id": 1, "name": "Phone 2", "description": "dup", "price": 1.0, "quantity": 1});
    let res = client().post(format!("{}/products/", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["detail"], "Product with id 1 already exists");

    let res = client().get(format!("{}/products/1", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?["name"], "Phone");
    Ok(())
}

#[tokio::test]
async fn e2e_put_replaces_all_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    // body id is ignored; the path id wins
    let body = json!({"id": 99, "name": "Desk", "description": "A standing desk", "price": 349.5, "quantity": 4});
    let res = c.put(format!("{}/products/4", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let expected = json!({"id": 4, "name": "Desk", "description": "A standing desk", "price": 349.5, "quantity": 4});
    assert_eq!(res.json::<Value>().await?, json!({"message": "Product updated", "product": expected}));

    let res = c.get(format!("{}/products/4", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, expected);

    let res = c.put(format!("{}/products/42", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_patch_partial_and_full() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.patch(format!("{}/products/2", app.base_url)).json(&json!({"quantity": 29})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Product updated");
    assert_eq!(body["product"]["quantity"], 29);
    assert_eq!(body["product"]["name"], "Laptop");

    // a complete body behaves like PUT
    let full = json!({"id": 2, "name": "Laptop Pro", "description": "Faster", "price": 1299.0, "quantity": 5});
    let res = c.patch(format!("{}/products/2", app.base_url)).json(&full).send().await?;
    assert_eq!(res.json::<Value>().await?["product"], full);

    let res = c.patch(format!("{}/products/42", app.base_url)).json(&json!({"quantity": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_rejects_malformed_body() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/products/", app.base_url))
        .json(&json!({"id": "five", "name": "Monitor"}))
        .send()
        .await?;
    assert!(res.status().is_client_error());

    let res = client().get(format!("{}/products/", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn e2e_cors_allows_configured_origin() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .request(reqwest::Method::OPTIONS, format!("{}/products/1", app.base_url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "DELETE")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await?;
    assert!(res.status().is_success());
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );

    let res = client()
        .get(format!("{}/products/", app.base_url))
        .header("Origin", "http://localhost:3000")
        .send()
        .await?;
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );

    let res = client()
        .get(format!("{}/products/", app.base_url))
        .header("Origin", "http://evil.example")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().get("access-control-allow-origin").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_memory_backend_without_seed() -> anyhow::Result<()> {
    let mut cfg = sqlite_config(StorageBackend::Memory);
    cfg.seed.enabled = false;
    let app = start_server_with(cfg).await?;

    let res = client().get(format!("{}/products/", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?, Vec::<Value>::new());

    let res = client().post(format!("{}/products/", app.base_url)).json(&monitor()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = client().get(format!("{}/products/5", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, monitor());
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api-docs/openapi.json", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc = res.json::<Value>().await?;
    assert!(doc["paths"]["/products/{id}"].is_object());
    Ok(())
}
