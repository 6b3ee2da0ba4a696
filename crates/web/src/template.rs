//! Hot-reloadable template rendering.
//!
//! A [`TemplateStore`] owns one compiled [`TemplateSet`] behind an [`ArcSwap`].
//! Renders load a single snapshot and use it for the whole render; a reload
//! compiles a complete replacement off to the side and swaps it in with one
//! store, so a concurrent render sees either the old set or the new set in
//! full. Reloads are serialized, and a reload that fails to compile leaves the
//! current set in place.

use crate::config::TemplateConfig;
use arc_swap::ArcSwap;
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template '{name}' not found")]
    NotFound { name: String },

    #[error("failed to compile templates '{pattern}'")]
    Compile { pattern: String, source: tera::Error },

    #[error("failed to render template '{name}'")]
    Execution { name: String, source: tera::Error },

    #[error("invalid template pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },
}

impl TemplateError {
    pub fn not_found<S: ToString>(name: S) -> Self {
        Self::NotFound { name: name.to_string() }
    }

    fn compile<S: ToString>(pattern: S, source: tera::Error) -> Self {
        Self::Compile { pattern: pattern.to_string(), source }
    }

    fn execution<S: ToString>(name: S, source: tera::Error) -> Self {
        Self::Execution { name: name.to_string(), source }
    }
}

/// An immutable, fully compiled set of templates
#[derive(Debug)]
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    pub fn empty() -> Self {
        Self { tera: Tera::default() }
    }

    /// Compiles every file matching `pattern`; template names are paths relative to the glob's base directory.
    pub fn compile(pattern: &str) -> Result<Self, TemplateError> {
        Tera::new(pattern).map(|tera| Self { tera }).map_err(|e| TemplateError::compile(pattern, e))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.tera.get_template_names().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tera.get_template_names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render_to<W: Write>(&self, name: &str, context: &Context, sink: W) -> Result<(), TemplateError> {
        if !self.contains(name) {
            return Err(TemplateError::not_found(name));
        }
        self.tera.render_to(name, context, sink).map_err(|e| TemplateError::execution(name, e))
    }
}

pub struct TemplateStore {
    config: Option<TemplateConfig>,
    current: ArcSwap<TemplateSet>,
    reload_lock: Mutex<()>,
}

impl TemplateStore {
    /// Validates `config` and compiles the initial set.
    pub fn new(config: TemplateConfig) -> Result<Self, TemplateError> {
        if !config.pattern().contains('*') {
            return Err(TemplateError::InvalidPattern {
                pattern: config.pattern().to_owned(),
                reason: "pattern must contain a '*' wildcard",
            });
        }

        let set = TemplateSet::compile(config.pattern())?;
        info!(pattern = config.pattern(), templates = set.len(), live_reload = config.is_live_reload(), "templates loaded");

        Ok(Self { config: Some(config), current: ArcSwap::from_pointee(set), reload_lock: Mutex::new(()) })
    }

    /// A store without templates; every render fails with [`TemplateError::NotFound`].
    pub fn empty() -> Self {
        Self { config: None, current: ArcSwap::from_pointee(TemplateSet::empty()), reload_lock: Mutex::new(()) }
    }

    pub fn config(&self) -> Option<&TemplateConfig> {
        self.config.as_ref()
    }

    pub fn is_live_reload(&self) -> bool {
        self.config.as_ref().is_some_and(TemplateConfig::is_live_reload)
    }

    /// Recompiles every template matching the configured pattern and swaps the new set in.
    ///
    /// On failure the previous set keeps being served.
    pub fn reload(&self) -> Result<(), TemplateError> {
        let Some(config) = &self.config else {
            return Ok(());
        };

        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match TemplateSet::compile(config.pattern()) {
            Ok(set) => {
                debug!(pattern = config.pattern(), templates = set.len(), "templates reloaded");
                self.current.store(Arc::new(set));
                Ok(())
            }
            Err(e) => {
                error!(pattern = config.pattern(), cause = ?e, "template reload failed, keeping previous templates");
                Err(e)
            }
        }
    }

    /// The set currently being served
    pub fn snapshot(&self) -> Arc<TemplateSet> {
        self.current.load_full()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current.load().contains(name)
    }

    /// Renders `name` with `data` into `sink`.
    ///
    /// In live-reload mode the set is recompiled first and a failed compile is returned.
    /// `data` must serialize to a map.
    pub fn render<W: Write>(&self, name: &str, data: &impl Serialize, sink: W) -> Result<(), TemplateError> {
        if self.is_live_reload() {
            self.reload()?;
        }

        let context = Context::from_serialize(data).map_err(|e| TemplateError::execution(name, e))?;
        self.snapshot().render_to(name, &context, sink)
    }

    pub fn render_to_string(&self, name: &str, data: &impl Serialize) -> Result<String, TemplateError> {
        let mut buf = Vec::with_capacity(1024);
        self.render(name, data, &mut buf)?;
        String::from_utf8(buf).map_err(|e| TemplateError::execution(name, tera::Error::msg(e)))
    }
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("config", &self.config)
            .field("templates", &self.current.load().names())
            .finish_non_exhaustive()
    }
}
