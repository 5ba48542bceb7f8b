//! Store connection settings, layered defaults <- `admin.toml` <- environment
//! <- CLI flags.

use std::collections::HashMap;
use std::fs;

use store_client::StoreConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub store_url: String,
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: "http://127.0.0.1:54321".into(),
            api_key: "dev-key".into(),
        }
    }
}

impl Settings {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            base_url: self.store_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

pub fn load_settings(cli_store_url: Option<String>, cli_api_key: Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("admin.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_file(&mut settings, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("STORE_URL") {
        settings.store_url = v;
    }
    if let Ok(v) = std::env::var("STORE_API_KEY") {
        settings.api_key = v;
    }

    if let Some(v) = cli_store_url {
        settings.store_url = v;
    }
    if let Some(v) = cli_api_key {
        settings.api_key = v;
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("store_url") {
        settings.store_url = v.clone();
    }
    if let Some(v) = file_cfg.get("api_key") {
        settings.api_key = v.clone();
    }
}
