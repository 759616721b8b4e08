pub mod action;
pub mod completions;
pub mod list;
pub mod render;
pub mod serve;

use crate::infrastructure::config::Settings;

/// Server URL for client commands: the explicit `--url`, else the
/// local server on the configured port.
pub fn server_url(url: Option<String>, settings: &Settings) -> String {
    url.unwrap_or_else(|| format!("http://localhost:{}", settings.port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_defaults_to_configured_port() {
        let settings = Settings {
            port: 8080,
            ..Settings::default()
        };
        assert_eq!(server_url(None, &settings), "http://localhost:8080");
        assert_eq!(
            server_url(Some("http://nas:9843".into()), &settings),
            "http://nas:9843"
        );
    }
}
