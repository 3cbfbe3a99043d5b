//! Browser automation configuration from TOML (`[browser]` section)

use scout_application::BrowserProfile;
use serde::{Deserialize, Serialize};

/// Browser-automation service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBrowserConfig {
    /// API key (usually supplied through `MINO_API_KEY`).
    pub api_key: Option<String>,
    /// Base URL of the service; `/v1/automation/run-sse` is appended.
    pub base_url: String,
    pub browser_profile: BrowserProfile,
    /// ISO country code; enables the proxy when set.
    pub proxy_country: Option<String>,
}

impl Default for FileBrowserConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://mino.ai".to_string(),
            browser_profile: BrowserProfile::Lite,
            proxy_country: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_profile_deserialize() {
        let toml_str = r#"
[browser]
browser_profile = "stealth"
proxy_country = "US"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.browser.browser_profile, BrowserProfile::Stealth);
        assert_eq!(config.browser.proxy_country.as_deref(), Some("US"));
        assert_eq!(config.browser.base_url, "https://mino.ai");
    }
}
