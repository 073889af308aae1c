use std::env;
use std::path::PathBuf;

use crate::analysis::DEFAULT_TOP_N;

pub const DEFAULT_DATA_PATH: &str = "data/crop_data_static.json";
pub const DEFAULT_EXPORT_PATH: &str = "data/ibge_2023_hectares_colhidos.xlsx";
pub const DEFAULT_EXPORT_FALLBACK_PATH: &str =
    "attached_assets/IBGE - 2023 - BRASIL HECTARES COLHIDOS_1752980032040.xlsx";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub export_path: PathBuf,
    pub export_fallback_path: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    pub ranking_limit: usize,
}

impl Config {
    /// Read configuration from the environment; every setting has a default
    pub fn from_env() -> Self {
        Config {
            data_path: env::var("DATA_PATH")
                .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string())
                .into(),
            export_path: env::var("EXPORT_PATH")
                .unwrap_or_else(|_| DEFAULT_EXPORT_PATH.to_string())
                .into(),
            export_fallback_path: env::var("EXPORT_FALLBACK_PATH")
                .unwrap_or_else(|_| DEFAULT_EXPORT_FALLBACK_PATH.to_string())
                .into(),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            ranking_limit: env::var("RANKING_LIMIT")
                .unwrap_or_else(|_| DEFAULT_TOP_N.to_string())
                .parse()
                .unwrap_or(DEFAULT_TOP_N),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
