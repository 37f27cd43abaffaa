pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileSource, FileStore, HttpSource, InMemoryPage, MemoryStore};
pub use config::{ContentBase, SiteConfig};
pub use core::carousel::{Carousel, CarouselInput, CarouselState};
pub use core::loader::ContentLoader;
pub use core::site::{ContentPaths, Site};
pub use core::theme::ThemeController;
pub use domain::model::{Project, Skill, ThemeMode};
pub use utils::error::{Result, SiteError};
