use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub app_name: String,
    pub deployment: String,
    pub bind_address: String,
    // Sentinel Hub OAuth client credentials and endpoints
    pub sh_client_id: String,
    pub sh_client_secret: String,
    pub sh_base_url: String,
    pub sh_collection: String,
    // Flat-file record store location
    pub fields_db_path: String,
    // Window length used when the analysis request omits dates
    pub default_window_days: i64,
    pub tests_running: bool, // Flag to indicate if tests are running
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available

        Config {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "fieldscope-api".to_string()),
            deployment: env::var("DEPLOYMENT")
                .expect("DEPLOYMENT must be set, this can be local, dev, stage, or prod"),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            sh_client_id: env::var("SH_CLIENT_ID").expect("SH_CLIENT_ID must be set"),
            sh_client_secret: env::var("SH_CLIENT_SECRET").expect("SH_CLIENT_SECRET must be set"),
            sh_base_url: env::var("SH_BASE_URL")
                .unwrap_or_else(|_| "https://services.sentinel-hub.com".to_string()),
            sh_collection: env::var("SH_COLLECTION")
                .unwrap_or_else(|_| "sentinel-2-l2a".to_string()),
            fields_db_path: env::var("FIELDS_DB_PATH")
                .unwrap_or_else(|_| "fields_db.json".to_string()),
            default_window_days: env::var("DEFAULT_WINDOW_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            tests_running: false, // Always false if using Config from_env
        }
    }

    pub fn for_tests() -> Self {
        Config {
            app_name: "fieldscope-api-test".to_string(),
            deployment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            sh_client_id: "test-client".to_string(),
            sh_client_secret: "test-secret".to_string(),
            sh_base_url: "http://localhost:9999".to_string(),
            sh_collection: "sentinel-2-l2a".to_string(),
            fields_db_path: std::env::temp_dir()
                .join(format!("fieldscope_test_{}.json", std::process::id()))
                .to_string_lossy()
                .into_owned(),
            default_window_days: 20,
            tests_running: true, // Set to true for test configurations
        }
    }
}
