//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use pastebox_server::{create_app, AppState, Config, Database, RetentionConfig};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        db_path: db_path.to_str().expect("db path").to_string(),
        port: 0,
        site_url: "http://paste.test".to_string(),
        max_paste_size: 64 * 1024,
        retention: RetentionConfig::default(),
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    TestServer::new(create_app(state)).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let server = test_server_for_config(test_config_for_db_path(&db_path));
    (server, temp_dir)
}
