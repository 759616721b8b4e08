//! On-disk TOML layout of the config file.
//!
//! Every key is optional so a partial file still loads; `Settings`
//! fills in the defaults and logs which ones it used.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDto {
    pub port: Option<u16>,
    pub template_dir: Option<String>,
    pub output_dir: Option<String>,
    pub env_file: Option<String>,
    pub docker_host: Option<String>,
    pub stop_timeout: Option<String>,
}
