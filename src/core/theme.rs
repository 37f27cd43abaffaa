use crate::domain::model::ThemeMode;
use crate::domain::ports::{Anchor, KeyValueStore, RenderTarget, Scope};
use crate::utils::error::Result;

pub const THEME_KEY: &str = "theme";
pub const LIGHT_MODE_CLASS: &str = "light-mode";

pub struct ThemeController<S: KeyValueStore> {
    store: S,
    key: String,
    mode: ThemeMode,
    bound: bool,
}

impl<S: KeyValueStore> ThemeController<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, THEME_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            mode: ThemeMode::Dark,
            bound: false,
        }
    }

    /// Restore the persisted mode and bind the toggle control. The mode is
    /// applied even when the toggle is missing.
    pub fn init(&mut self, target: &mut dyn RenderTarget) {
        self.mode = ThemeMode::from_persisted(self.store.get(&self.key).as_deref());
        if self.mode == ThemeMode::Light {
            target.set_class(Scope::Body, LIGHT_MODE_CLASS, true);
        }

        self.bound = target.has(Anchor::ThemeToggle);
        if !self.bound {
            tracing::warn!("[Theme] theme-toggle not found");
            return;
        }
        target.set_text(Anchor::ThemeToggle, self.mode.glyph());
        tracing::debug!("Theme restored: {}", self.mode);
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Toggle activation. Does nothing when no toggle control was bound.
    pub fn toggle(&mut self, target: &mut dyn RenderTarget) -> Result<ThemeMode> {
        if !self.bound {
            return Ok(self.mode);
        }
        self.mode = self.mode.toggled();
        target.set_class(Scope::Body, LIGHT_MODE_CLASS, self.mode == ThemeMode::Light);
        target.set_text(Anchor::ThemeToggle, self.mode.glyph());
        self.store.set(&self.key, self.mode.as_str())?;
        tracing::info!("Theme switched to {}", self.mode);
        Ok(self.mode)
    }
}
