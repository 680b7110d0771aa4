use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use configs::{AppConfig, StorageBackend};
use server::startup;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    data_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

fn config(data_dir: &PathBuf) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = "e2e-secret".into();
    cfg.auth.admin_username = "admin".into();
    cfg.auth.admin_password = "S3curePass!".into();
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.data_dir = data_dir.to_string_lossy().into_owned();
    cfg.storage.file_path = data_dir.join("mensagem.json").to_string_lossy().into_owned();
    cfg
}

async fn start_server(data_dir: PathBuf) -> anyhow::Result<TestApp> {
    let state = startup::build_state(&config(&data_dir)).await?;
    let app = startup::build_app(state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}", addr), client: reqwest::Client::new(), data_dir })
}

fn fresh_dir() -> PathBuf {
    std::env::temp_dir().join(format!("aviso_e2e_{}", Uuid::new_v4()))
}

impl TestApp {
    async fn login(&self) -> anyhow::Result<String> {
        let res = self
            .client
            .post(format!("{}/api/login", self.base_url))
            .json(&json!({"username": "admin", "password": "S3curePass!"}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body: Value = res.json().await?;
        Ok(body["token"].as_str().unwrap_or_default().to_string())
    }

    async fn write(&self, token: &str, title: &str, mensagem: &str) -> anyhow::Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/api/mensagem", self.base_url))
            .bearer_auth(token)
            .json(&json!({"title": title, "mensagem": mensagem}))
            .send()
            .await?)
    }
}

#[tokio::test]
async fn e2e_publish_and_read_over_http() -> anyhow::Result<()> {
    let app = start_server(fresh_dir()).await?;

    let res = app.client.get(format!("{}/api/aviso", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let token = app.login().await?;
    let res = app.write(&token, "Maintenance", "Service down 2-4am").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = app.client.get(format!("{}/api/aviso", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"title": "Maintenance", "mensagem": "Service down 2-4am"}));

    let res = app
        .client
        .get(format!("{}/api/validate-token", app.base_url))
        .header("authorization", format!("bearer {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_message_survives_restart() -> anyhow::Result<()> {
    let dir = fresh_dir();
    let first = start_server(dir.clone()).await?;
    let token = first.login().await?;
    assert_eq!(first.write(&token, "Persisted", "still here").await?.status(), HttpStatusCode::OK);

    let on_disk: Value = serde_json::from_slice(&tokio::fs::read(dir.join("mensagem.json")).await?)?;
    assert_eq!(on_disk, json!({"title": "Persisted", "mensagem": "still here"}));

    // second instance over the same file; the first one's Drop would remove the dir
    let state = startup::build_state(&config(&dir)).await?;
    let stored = state.messages.read().await?;
    assert_eq!(stored.title, "Persisted");
    assert_eq!(stored.body, "still here");
    drop(first);
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_writers_leave_one_complete_message() -> anyhow::Result<()> {
    let app = start_server(fresh_dir()).await?;
    let token = app.login().await?;

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = app.client.clone();
        let url = format!("{}/api/mensagem", app.base_url);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .bearer_auth(token)
                .json(&json!({"title": format!("t{i}"), "mensagem": format!("m{i}")}))
                .send()
                .await
                .map(|r| r.status())
        }));
    }
    for h in handles {
        assert_eq!(h.await??, HttpStatusCode::OK);
    }

    let body: Value = app.client.get(format!("{}/api/aviso", app.base_url)).send().await?.json().await?;
    let title = body["title"].as_str().unwrap_or_default().to_string();
    let mensagem = body["mensagem"].as_str().unwrap_or_default().to_string();
    assert!(title.starts_with('t'));
    assert_eq!(&title[1..], &mensagem[1..]);
    Ok(())
}

#[tokio::test]
async fn e2e_unauthenticated_write_rejected() -> anyhow::Result<()> {
    let app = start_server(fresh_dir()).await?;
    let res = app
        .client
        .post(format!("{}/api/mensagem", app.base_url))
        .header("authorization", "Basic YWRtaW46cHc=")
        .json(&json!({"title": "x", "mensagem": "y"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Token não fornecido.");
    assert!(!app.data_dir.join("mensagem.json").exists());
    Ok(())
}
