//! Render the API reference page: the spec (or a link to it) plus the UI
//! configuration, handed to the external UI script.

use std::path::PathBuf;

use minijinja::{AutoEscape, Environment, context};

use crate::config::{DEFAULT_CDN, DEFAULT_TITLE, DocConfig, UiConfiguration};
use crate::error::{LoadError, RenderError};
use crate::load::{DEFAULT_BASE_FILE_NAME, load_from_bytes, load_from_dir};
use crate::model::Spec;

/// Post-load hook applied to the spec before it is embedded.
pub type SpecModifier = Box<dyn Fn(Spec) -> Spec + Send + Sync>;

/// Where the page gets its spec from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Linked, fetched by the UI script at view time.
    Url(String),
    /// Root file plus fragment directories, loaded and embedded.
    Directory {
        root: PathBuf,
        base_file_name: String,
    },
    /// A self-contained YAML or JSON document, loaded and embedded.
    Bytes(Vec<u8>),
}

impl SpecSource {
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        SpecSource::Directory {
            root: root.into(),
            base_file_name: DEFAULT_BASE_FILE_NAME.to_string(),
        }
    }

    /// Load the spec, or `None` for a linked source.
    pub fn load(&self) -> Result<Option<Spec>, LoadError> {
        match self {
            SpecSource::Url(_) => Ok(None),
            SpecSource::Directory {
                root,
                base_file_name,
            } => load_from_dir(root, base_file_name).map(Some),
            SpecSource::Bytes(bytes) => load_from_bytes(bytes).map(Some),
        }
    }
}

/// Everything needed to render one reference page.
pub struct DocPage {
    pub source: Option<SpecSource>,
    pub cdn: String,
    pub override_css: Option<String>,
    pub ui: UiConfiguration,
    pub spec_modifier: Option<SpecModifier>,
}

impl DocPage {
    pub fn new(source: SpecSource) -> Self {
        Self {
            source: Some(source),
            cdn: DEFAULT_CDN.to_string(),
            override_css: None,
            ui: UiConfiguration::default(),
            spec_modifier: None,
        }
    }

    /// Build a page from project config. A configured URL takes precedence
    /// over a configured directory; with neither, rendering fails with
    /// [`RenderError::MissingSource`].
    pub fn from_config(config: &DocConfig) -> Self {
        let source = match (&config.spec.url, &config.spec.dir) {
            (Some(url), _) if !url.trim().is_empty() => Some(SpecSource::Url(url.clone())),
            (_, Some(dir)) => Some(SpecSource::Directory {
                root: dir.clone(),
                base_file_name: config.spec.base_file_name.clone(),
            }),
            _ => None,
        };
        Self {
            source,
            cdn: config.cdn.clone(),
            override_css: config.override_css.clone(),
            ui: config.ui.clone(),
            spec_modifier: None,
        }
    }

    pub fn with_spec_modifier(
        mut self,
        modifier: impl Fn(Spec) -> Spec + Send + Sync + 'static,
    ) -> Self {
        self.spec_modifier = Some(Box::new(modifier));
        self
    }

    /// Load the spec and apply the modifier once. `None` for a linked source.
    pub fn load_spec(&self) -> Result<Option<Spec>, RenderError> {
        let source = self.source.as_ref().ok_or(RenderError::MissingSource)?;
        let spec = source.load()?;
        Ok(match (spec, &self.spec_modifier) {
            (Some(spec), Some(modifier)) => Some(modifier(spec)),
            (spec, _) => spec,
        })
    }

    pub fn render(&self) -> Result<String, RenderError> {
        let mut ui = self.ui.clone();

        let spec_json = match self.load_spec()? {
            Some(spec) => {
                if ui.custom_title().is_none() {
                    ui.metadata
                        .insert("title".to_string(), spec.info.title.clone().into());
                }
                Some(embed_json(&serde_json::to_string(&spec)?))
            }
            None => None,
        };
        let spec_url = match &self.source {
            Some(SpecSource::Url(url)) => Some(url.as_str()),
            _ => None,
        };

        let title = ui
            .metadata
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        let configuration = serde_json::to_string(&ui)?;

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template("index.html.j2", include_str!("../templates/index.html.j2"))?;
        let tmpl = env.get_template("index.html.j2")?;

        Ok(tmpl.render(context! {
            title => title,
            override_css => self.override_css.as_deref().filter(|css| !css.trim().is_empty()),
            configuration => configuration,
            spec_url => spec_url,
            spec_json => spec_json,
            cdn => self.cdn.as_str(),
        })?)
    }
}

/// Make serialized JSON safe inside a `<script>` element. `<` only occurs
/// inside JSON strings, where `\u003c` is an equivalent escape.
fn embed_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}
