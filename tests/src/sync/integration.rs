use std::fs;
use std::time::Duration;

use autoconf_common::config::{ConfigTarget, default_targets};
use autoconf_common::services::ServiceTable;
use autoconf_core::sync::{Synchronizer, server_map};
use autoconf_protocols::http::{Health, HealthClient};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::utils::{closed_port, http_server};

fn read_json(target: &ConfigTarget) -> Value {
    serde_json::from_str(&fs::read_to_string(&target.path).unwrap()).unwrap()
}

/// One healthy service, one failing, one down: all three land in every file.
#[tokio::test]
async fn probes_are_advisory_and_every_file_is_rewritten() {
    let up = http_server("200 OK").await;
    let failing = http_server("500 Internal Server Error").await;
    let down = closed_port().await;
    let services: ServiceTable = [("context7", up), ("desktop-commander", failing), ("offline", down)]
        .into_iter()
        .collect();

    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("Library").join("Application Support");
    let targets = default_targets(home.path(), &config_dir);
    fs::create_dir_all(targets[0].path.parent().unwrap()).unwrap();
    fs::write(
        &targets[0].path,
        r#"{"globalShortcut": "Ctrl+Space", "mcpServers": {"legacy": {"command": "npx"}}}"#,
    )
    .unwrap();

    let sync = Synchronizer::new(HealthClient::new(Duration::from_secs(1)).unwrap());
    let statuses = sync.check_services("127.0.0.1", &services).await;
    let report = sync.apply(&targets, &server_map(&statuses));

    let health: Vec<&Health> = statuses.iter().map(|s| &s.health).collect();
    assert_eq!(health[0], &Health::Healthy);
    assert_eq!(health[1], &Health::Unhealthy(500));
    assert!(matches!(health[2], Health::Unreachable(_)));
    assert!(report.is_success());

    let expected_servers = json!({
        "context7": { "type": "http", "url": format!("http://127.0.0.1:{up}/") },
        "desktop-commander": { "type": "http", "url": format!("http://127.0.0.1:{failing}/") },
        "offline": { "type": "http", "url": format!("http://127.0.0.1:{down}/") },
    });

    let claude = read_json(&targets[0]);
    assert_eq!(claude["globalShortcut"], "Ctrl+Space");
    assert_eq!(claude["mcpServers"], expected_servers);

    for target in &targets[1..] {
        assert_eq!(read_json(target), json!({ "mcpServers": expected_servers }));
    }
}

/// A corrupt file is reported and left alone; the remaining files still update.
#[tokio::test]
async fn corrupt_file_is_isolated() {
    let home = TempDir::new().unwrap();
    let targets = default_targets(home.path(), &home.path().join(".config"));
    fs::create_dir_all(targets[1].path.parent().unwrap()).unwrap();
    fs::write(&targets[1].path, "mcpServers = {}").unwrap();

    let services: ServiceTable = [("context7", closed_port().await)].into_iter().collect();
    let sync = Synchronizer::new(HealthClient::new(Duration::from_millis(200)).unwrap());
    let statuses = sync.check_services("127.0.0.1", &services).await;
    let report = sync.apply(&targets, &server_map(&statuses));

    let failed: Vec<&str> = report.failures().map(|(t, _)| t.app.as_str()).collect();
    assert_eq!(failed, vec!["Perplexity"]);
    assert_eq!(report.updated().count(), 2);
    assert_eq!(fs::read_to_string(&targets[1].path).unwrap(), "mcpServers = {}");
}
