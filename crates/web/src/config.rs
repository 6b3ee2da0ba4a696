//! Configuration values that can be embedded in an outer configuration file.

use serde::Deserialize;

/// Where templates live and whether they are recompiled on every render.
///
/// ```
/// use micro_bind_web::TemplateConfig;
///
/// let config: TemplateConfig = serde_json::from_str(r#"{"pattern": "templates/*.html"}"#).unwrap();
/// assert_eq!(config, TemplateConfig::new("templates/*.html"));
/// assert!(!config.is_live_reload());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateConfig {
    pattern: String,
    #[serde(default)]
    live_reload: bool,
}

impl TemplateConfig {
    /// `pattern` is a glob such as `templates/*.html` or `templates/**/*`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), live_reload: false }
    }

    /// Recompile the whole set before each render. Meant for development.
    #[must_use]
    pub fn live_reload(mut self, live_reload: bool) -> Self {
        self.live_reload = live_reload;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_live_reload(&self) -> bool {
        self.live_reload
    }
}
