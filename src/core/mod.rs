pub mod carousel;
pub mod detail;
pub mod loader;
pub mod markup;
pub mod navigation;
pub mod renderer;
pub mod site;
pub mod theme;

pub use crate::domain::model::{Project, Skill, ThemeMode};
pub use crate::domain::ports::{Anchor, ContentSource, KeyValueStore, RenderTarget, Scope};
pub use crate::utils::error::Result;
