use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw document retrieval. Implementations must bypass any caching layer.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        (**self).fetch(location).await
    }
}

/// Durable string key/value capability (the browser's local storage).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Fixed elements of the page the components bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anchor {
    SkillsGrid,
    CarouselRegion,
    CarouselTrack,
    CarouselDots,
    CarouselPrev,
    CarouselNext,
    ThemeToggle,
    ProjectDetail,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::SkillsGrid,
        Anchor::CarouselRegion,
        Anchor::CarouselTrack,
        Anchor::CarouselDots,
        Anchor::CarouselPrev,
        Anchor::CarouselNext,
        Anchor::ThemeToggle,
        Anchor::ProjectDetail,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Anchor::SkillsGrid => ".skills-grid",
            Anchor::CarouselRegion => ".projects-carousel",
            Anchor::CarouselTrack => ".carousel-track",
            Anchor::CarouselDots => ".carousel-dots",
            Anchor::CarouselPrev => ".carousel-button.prev",
            Anchor::CarouselNext => ".carousel-button.next",
            Anchor::ThemeToggle => "#theme-toggle",
            Anchor::ProjectDetail => "#project-detail .container",
        }
    }
}

/// Page-wide elements carrying mode classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The document element (`<html>`).
    Root,
    Body,
}

/// Everything the components are allowed to do to a page.
///
/// Mutations against an anchor the page does not have are no-ops; methods
/// that report success return `false` in that case.
pub trait RenderTarget {
    fn has(&self, anchor: Anchor) -> bool;

    /// Replace the children of `anchor` with one child per fragment.
    fn render_list(&mut self, anchor: Anchor, fragments: Vec<String>) -> bool;

    /// Replace the whole inner markup of `anchor`.
    fn render_content(&mut self, anchor: Anchor, html: String) -> bool;

    fn child_count(&self, anchor: Anchor) -> usize;
    fn set_attribute(&mut self, anchor: Anchor, name: &str, value: &str);
    fn set_child_attribute(&mut self, anchor: Anchor, index: usize, name: &str, value: &str);
    fn set_style(&mut self, anchor: Anchor, property: &str, value: &str);
    fn set_text(&mut self, anchor: Anchor, text: &str);

    fn set_class(&mut self, scope: Scope, class: &str, on: bool);
    fn has_class(&self, scope: Scope, class: &str) -> bool;

    fn capture_pointer(&mut self, anchor: Anchor, pointer_id: i32);
    fn release_pointer(&mut self, anchor: Anchor, pointer_id: i32);

    fn section_ids(&self) -> Vec<String>;
    fn set_section_class(&mut self, id: &str, class: &str);
    /// Scroll the section with `id` into view; `false` if there is none.
    fn scroll_into_view(&mut self, id: &str) -> bool;
}
