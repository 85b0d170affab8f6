use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::load::DEFAULT_BASE_FILE_NAME;

/// Default UI script.
pub const DEFAULT_CDN: &str = "https://cdn.jsdelivr.net/npm/@scalar/api-reference";

/// Page title used until the spec or the user provides one.
pub const DEFAULT_TITLE: &str = "API Reference";

/// Top-level project configuration loaded from `.scalardoc.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    pub spec: SpecSourceConfig,
    pub output: PathBuf,
    pub cdn: String,
    pub override_css: Option<String>,
    pub ui: UiConfiguration,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            spec: SpecSourceConfig::default(),
            output: PathBuf::from("index.html"),
            cdn: DEFAULT_CDN.to_string(),
            override_css: None,
            ui: UiConfiguration::default(),
        }
    }
}

/// Where the spec comes from. `url` wins over `dir` when both are set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpecSourceConfig {
    pub url: Option<String>,
    pub dir: Option<PathBuf>,
    pub base_file_name: String,
}

impl Default for SpecSourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            dir: None,
            base_file_name: DEFAULT_BASE_FILE_NAME.to_string(),
        }
    }
}

/// Color theme of the rendered reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Default,
    Alternate,
    Moon,
    Purple,
    Solarized,
    BluePlanet,
    DeepSpace,
    Saturn,
    Kepler,
    Mars,
    None,
}

/// Page layout of the rendered reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Modern,
    Classic,
}

/// Client snippets to hide: `true` hides all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HiddenClients {
    All(bool),
    Only(Vec<String>),
}

/// A server offered in place of the spec's own `servers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOverride {
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Prefilled credentials for the request client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Authentication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_security: Option<bool>,
    /// A scheme name, or a list mixing names and lists of names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_security_scheme: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpAuthentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<TokenAuthentication>,
}

/// HTTP credentials; either scheme, or both, may be prefilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpAuthentication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicAuthentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer: Option<TokenAuthentication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuthentication {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAuthentication {
    pub token: String,
}

/// Configuration blob handed to the UI script through `data-configuration`.
/// Unset options are omitted so the script applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfiguration {
    pub theme: Theme,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_sidebar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_models: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_download_button: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_dark_mode_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_dark_mode_toggle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_hot_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_clients: Option<HiddenClients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_routing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_default_fonts: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerOverride>,
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl Default for UiConfiguration {
    fn default() -> Self {
        let mut metadata = IndexMap::new();
        metadata.insert("title".to_string(), DEFAULT_TITLE.into());
        Self {
            theme: Theme::default(),
            layout: Layout::default(),
            proxy: None,
            is_editable: None,
            show_sidebar: None,
            hide_models: None,
            hide_download_button: None,
            dark_mode: None,
            force_dark_mode_state: None,
            hide_dark_mode_toggle: None,
            search_hot_key: None,
            hidden_clients: None,
            authentication: None,
            path_routing: None,
            base_server_url: None,
            with_default_fonts: None,
            servers: Vec::new(),
            metadata,
        }
    }
}

impl UiConfiguration {
    /// The configured page title, unless it is missing or still the default.
    pub fn custom_title(&self) -> Option<&str> {
        self.metadata
            .get("title")
            .and_then(|t| t.as_str())
            .filter(|t| *t != DEFAULT_TITLE)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".scalardoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DocConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# scalardoc configuration
spec:
  dir: ./api                 # root directory holding the base file and paths/ schemas/ responses/
  base_file_name: api.yaml
  # url: https://example.com/openapi.yaml   # takes precedence over dir

output: index.html
# cdn: https://cdn.jsdelivr.net/npm/@scalar/api-reference
# override_css: |
#   h1 { color: red; }

ui:
  theme: default             # default | alternate | moon | purple | solarized | bluePlanet | deepSpace | saturn | kepler | mars | none
  layout: modern             # modern | classic
  # darkMode: true
  # hideDownloadButton: true
  # hiddenClients: [fetch, httr]   # or `true` to hide every client
  # authentication:
  #   preferredSecurityScheme: api_key
  #   apiKey:
  #     token: secret
  # servers:
  #   - url: http://localhost:8080
  #     description: Local
  metadata:
    title: API Reference     # replaced by the spec's info.title while left at this value
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocConfig::default();
        assert_eq!(config.spec.base_file_name, "api.yaml");
        assert!(config.spec.url.is_none());
        assert_eq!(config.output, PathBuf::from("index.html"));
        assert_eq!(config.cdn, DEFAULT_CDN);
        assert_eq!(config.ui.theme, Theme::Default);
        assert_eq!(config.ui.layout, Layout::Modern);
        assert!(config.ui.custom_title().is_none());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
spec:
  dir: docs/api
  base_file_name: pet-store.yml
output: public/docs.html
override_css: "h1 { color: red; }"
ui:
  theme: bluePlanet
  layout: classic
  hideDarkModeToggle: true
  hiddenClients: [fetch, httr]
  authentication:
    preferredSecurityScheme: [[basic, api_key], oauth]
    http:
      bearer:
        token: abc
  servers:
    - url: http://localhost:8080
      description: Local
  metadata:
    title: Pets
    description: All about pets
"#;
        let config: DocConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.spec.dir, Some(PathBuf::from("docs/api")));
        assert_eq!(config.spec.base_file_name, "pet-store.yml");
        assert_eq!(config.output, PathBuf::from("public/docs.html"));
        assert_eq!(config.cdn, DEFAULT_CDN);
        assert_eq!(config.ui.theme, Theme::BluePlanet);
        assert_eq!(config.ui.layout, Layout::Classic);
        assert_eq!(config.ui.hide_dark_mode_toggle, Some(true));
        assert_eq!(
            config.ui.hidden_clients,
            Some(HiddenClients::Only(vec!["fetch".into(), "httr".into()]))
        );
        let auth = config.ui.authentication.as_ref().unwrap();
        assert_eq!(
            auth.http,
            Some(HttpAuthentication {
                basic: None,
                bearer: Some(TokenAuthentication {
                    token: "abc".into()
                }),
            })
        );
        assert_eq!(config.ui.servers.len(), 1);
        assert_eq!(config.ui.custom_title(), Some("Pets"));
    }

    #[test]
    fn test_ui_configuration_json() {
        let mut ui = UiConfiguration {
            dark_mode: Some(true),
            hidden_clients: Some(HiddenClients::All(true)),
            ..UiConfiguration::default()
        };
        ui.authentication = Some(Authentication {
            http: Some(HttpAuthentication {
                basic: Some(BasicAuthentication {
                    username: "user".into(),
                    password: "pass".into(),
                }),
                bearer: None,
            }),
            api_key: Some(TokenAuthentication {
                token: "key".into(),
            }),
            ..Authentication::default()
        });

        let json = serde_json::to_value(&ui).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "theme": "default",
                "layout": "modern",
                "darkMode": true,
                "hiddenClients": true,
                "authentication": {
                    "http": { "basic": { "username": "user", "password": "pass" } },
                    "apiKey": { "token": "key" }
                },
                "metadata": { "title": "API Reference" }
            })
        );
    }

    #[test]
    fn test_default_config_content_parses() {
        let config: DocConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.spec.dir, Some(PathBuf::from("./api")));
        assert_eq!(config.ui.theme, Theme::Default);
    }

    #[test]
    fn test_load_config_http_authentication() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
ui:
  authentication:
    preferredSecurityScheme: basic
    http:
      basic:
        username: admin
        password: hunter2
      bearer:
        token: abc
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().unwrap();
        let http = config.ui.authentication.unwrap().http.unwrap();
        assert_eq!(
            http.basic,
            Some(BasicAuthentication {
                username: "admin".into(),
                password: "hunter2".into(),
            })
        );
        assert_eq!(http.bearer.unwrap().token, "abc");
    }

    #[test]
    fn test_load_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().is_none());
    }
}
