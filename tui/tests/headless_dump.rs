//! Config files on disk and the `--dump` output built from them.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use anuncios_tui::Config;
use anuncios_tui::config::CONFIG_PATH_ENV;
use anuncios_tui::config::ConfigError;
use anuncios_tui::config::ConfigOverrides;
use anuncios_tui::dump::DumpFormat;
use anuncios_tui::dump::run_dump;
use anuncios_tui::fetch::UNREACHABLE_MESSAGE;
use anuncios_tui::render::SUBTITLE;
use anuncios_tui::style::Platform;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

fn load(path: PathBuf) -> Result<Config, ConfigError> {
    Config::load_with_env(
        ConfigOverrides {
            config_path: Some(path),
            ..ConfigOverrides::default()
        },
        |_| None,
    )
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/anuncios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id_anuncio": 1, "nombre": "Bici", "tipo": "Deporte", "precio": 199.5},
            {"id_anuncio": 2, "nombre": "Mesa", "tipo": "Hogar", "precio": "45"},
            {"nombre": "Sin id"}
        ])))
        .mount(&server)
        .await;
    server
}

#[test]
fn explicit_config_file_is_read() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "base_url = \"http://127.0.0.1:4000\"\nplatform = \"web\"\n",
    );

    let config = load(path.clone()).unwrap();

    assert_eq!(config.client.base_url, "http://127.0.0.1:4000");
    assert_eq!(config.platform, Platform::Web);
    assert_eq!(config.source_path, Some(path));
}

#[test]
fn config_path_can_come_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "listings_path = \"v2/anuncios\"\n");
    let env_path = path.to_string_lossy().into_owned();

    let config = Config::load_with_env(ConfigOverrides::default(), |key| {
        (key == CONFIG_PATH_ENV).then(|| env_path.clone())
    })
    .unwrap();

    assert_eq!(config.client.listings_path, "v2/anuncios");
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "base_url = [unterminated");

    let err = load(path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn missing_explicit_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();

    let err = load(dir.path().join("nope.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}

#[tokio::test]
async fn text_dump_prints_every_row() {
    let server = backend().await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &format!("base_url = \"{}\"\nlistings_path = \"/api/anuncios\"\n", server.uri()),
    );
    let config = load(path).unwrap();

    let output = run_dump(&config, DumpFormat::Text, 100).await.unwrap();

    assert!(output.success);
    assert!(output.text.contains(SUBTITLE));
    for needle in ["Bici", "Mesa", "Sin id", "$199.50", "$45.00", "$0.00"] {
        assert!(output.text.contains(needle), "missing {needle}:\n{}", output.text);
    }
}

#[tokio::test]
async fn json_dump_lists_normalized_records() {
    let server = backend().await;
    let mut config = Config::default();
    config.client.base_url = server.uri();
    config.client.listings_path = "api/anuncios".to_string();

    let output = run_dump(&config, DumpFormat::Json, 80).await.unwrap();
    let payload: Value = serde_json::from_str(&output.text).unwrap();

    assert!(output.success);
    assert_eq!(payload["state"], "success");
    assert_eq!(payload["records"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["records"][1]["price"], json!(45.0));
    assert_eq!(payload["records"][0]["imageUrl"], Value::Null);
}

#[tokio::test]
async fn json_dump_does_not_pass_positions_off_as_ids() {
    let server = backend().await;
    let mut config = Config::default();
    config.client.base_url = server.uri();
    config.client.listings_path = "api/anuncios".to_string();

    let output = run_dump(&config, DumpFormat::Json, 80).await.unwrap();
    let payload: Value = serde_json::from_str(&output.text).unwrap();

    assert_eq!(payload["records"][1]["id"], json!(2));
    assert_eq!(payload["records"][1]["idSource"], "backend");
    assert_eq!(payload["records"][2]["id"], Value::Null);
    assert_eq!(payload["records"][2]["idSource"], "position");
}

#[tokio::test]
async fn failed_fetch_marks_dump_unsuccessful() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let mut config = Config::default();
    config.client.base_url = format!("http://{addr}");

    let output = run_dump(&config, DumpFormat::Json, 80).await.unwrap();
    let payload: Value = serde_json::from_str(&output.text).unwrap();

    assert!(!output.success);
    assert_eq!(payload["state"], "error");
    assert_eq!(payload["error"], UNREACHABLE_MESSAGE);
    assert_eq!(payload["records"], json!([]));
}
