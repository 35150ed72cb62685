//! Application Configuration
//!
//! Resolved once at startup and provided via context.

use leptos::prelude::*;

/// localStorage key overriding the API base URL
pub const API_URL_STORAGE_KEY: &str = "org_chart.api_base_url";

const DEFAULT_API_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_base_url: String,
    /// Total duration of the tree/grid transition indicator
    pub transition_duration_ms: u32,
    /// Number of progress ticks during the transition
    pub transition_steps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            transition_duration_ms: 600,
            transition_steps: 12,
        }
    }
}

impl AppConfig {
    /// Resolve from the stored override, the build-time env, then the default
    pub fn load() -> Self {
        let stored = local_storage().and_then(|s| s.get_item(API_URL_STORAGE_KEY).ok().flatten());
        let url = Self::resolve_base_url(stored.as_deref(), option_env!("ORG_CHART_API_URL"));
        web_sys::console::log_1(&format!("[CONFIG] API base URL: {}", url).into());
        Self {
            api_base_url: url,
            ..Self::default()
        }
    }

    fn resolve_base_url(stored: Option<&str>, build_time: Option<&str>) -> String {
        let url = [stored, build_time]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let trimmed = url.trim_end_matches('/');
        if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() }
    }

    /// Delay between transition ticks
    pub fn transition_tick_ms(&self) -> u32 {
        if self.transition_steps == 0 {
            return 0;
        }
        self.transition_duration_ms / self.transition_steps
    }
}

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_precedence() {
        assert_eq!(AppConfig::resolve_base_url(Some("https://a.example/api/"), Some("/b")), "https://a.example/api");
        assert_eq!(AppConfig::resolve_base_url(Some("  "), Some("/b/")), "/b");
        assert_eq!(AppConfig::resolve_base_url(None, None), "/api");
        assert_eq!(AppConfig::resolve_base_url(Some("/"), None), "/");
    }

    #[test]
    fn transition_ticks() {
        assert_eq!(AppConfig::default().transition_tick_ms(), 50);
        let instant = AppConfig { transition_steps: 0, ..AppConfig::default() };
        assert_eq!(instant.transition_tick_ms(), 0);
    }
}
