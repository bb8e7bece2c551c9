use fxdash::core::SessionState;
use fxdash::store::DiskStorage;
use fxdash::{AppCommand, FavoritesCommand};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(base: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/v4/latest/{base}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub const USD_RATES: &str = r#"{
        "base": "USD",
        "date": "2025-01-01",
        "rates": { "USD": 1, "INR": 83.25, "EUR": 0.92, "GBP": 0.79, "JPY": 157.2 }
    }"#;
}

/// Writes a config pointing at `base_url` with storage under `dir`.
fn write_config(dir: &Path, base_url: &str) -> String {
    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
        base_currency: USD
        providers:
          exchangerate:
            base_url: {}
        data_path: {}
    "#,
        base_url,
        dir.join("data").display()
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path.to_str().unwrap().to_string()
}

fn load_state(dir: &Path) -> SessionState {
    let storage = DiskStorage::open(&dir.join("data")).expect("Failed to open storage");
    SessionState::load(Arc::new(storage))
}

#[test_log::test(tokio::test)]
async fn test_convert_records_history() {
    let mock_server = test_utils::create_mock_server("USD", 200, test_utils::USD_RATES).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = fxdash::run_command(
        AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "INR".to_string(),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());

    let state = load_state(temp_dir.path());
    let records = state.history().records();
    info!(?records, "Persisted conversions");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount(), 10.0);
    assert_eq!(records[0].from_currency(), "USD");
    assert_eq!(records[0].to_currency(), "INR");
    assert_eq!(records[0].result(), 832.5);
    assert_eq!(records[0].rate(), 83.25);
}

#[test_log::test(tokio::test)]
async fn test_convert_missing_target_records_nothing() {
    let mock_server = test_utils::create_mock_server("USD", 200, test_utils::USD_RATES).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = fxdash::run_command(
        AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "XYZ".to_string(),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok());

    assert!(load_state(temp_dir.path()).history().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_convert_with_server_error_does_not_fail() {
    let mock_server = test_utils::create_mock_server("USD", 500, "").await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let result = fxdash::run_command(
        AppCommand::Convert {
            amount: "10".to_string(),
            from: "USD".to_string(),
            to: "INR".to_string(),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_ok());

    assert!(load_state(temp_dir.path()).history().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_favorites_persist_across_runs() {
    let mock_server = test_utils::create_mock_server("USD", 200, test_utils::USD_RATES).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    for cmd in [
        FavoritesCommand::Add("INR".to_string()),
        FavoritesCommand::Remove("JPY".to_string()),
        FavoritesCommand::Add("INR".to_string()),
        FavoritesCommand::List,
    ] {
        let result = fxdash::run_command(AppCommand::Favorites(cmd), Some(&config_path)).await;
        assert!(result.is_ok(), "Favorites failed with: {:?}", result.err());
    }

    let state = load_state(temp_dir.path());
    assert_eq!(state.favorites().codes(), ["USD", "EUR", "GBP", "INR"]);
}

#[test_log::test(tokio::test)]
async fn test_rates_history_and_historical_commands() {
    let mock_server = test_utils::create_mock_server("USD", 200, test_utils::USD_RATES).await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), &mock_server.uri());

    let commands = vec![
        AppCommand::Rates {
            base: None,
            all: false,
        },
        AppCommand::Rates {
            base: Some("USD".to_string()),
            all: true,
        },
        AppCommand::History { limit: 5 },
        AppCommand::Historical {
            from: "USD".to_string(),
            to: "INR".to_string(),
            period: "30D".parse().unwrap(),
        },
    ];

    for cmd in commands {
        let result = fxdash::run_command(cmd, Some(&config_path)).await;
        assert!(result.is_ok(), "Command failed with: {:?}", result.err());
    }
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let result = fxdash::run_command(
        AppCommand::History { limit: 5 },
        Some(missing.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}
