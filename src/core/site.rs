use crate::core::carousel::{Carousel, CarouselInput};
use crate::core::detail::{self, Resolution};
use crate::core::loader::ContentLoader;
use crate::core::theme::ThemeController;
use crate::core::{navigation, renderer};
use crate::domain::model::{default_projects, default_skills, Project, Skill, ThemeMode};
use crate::domain::ports::{ContentSource, KeyValueStore, RenderTarget, Scope};
use crate::utils::error::Result;

pub const SCRIPT_ENABLED_CLASS: &str = "js";

/// Candidate locations for the listing page's documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPaths {
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            skills: vec![
                "content/skills.json".to_string(),
                "./content/skills.json".to_string(),
            ],
            projects: vec![
                "content/projects.json".to_string(),
                "./content/projects.json".to_string(),
            ],
        }
    }
}

/// What the listing page ended up showing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSummary {
    pub skills: usize,
    pub projects: usize,
    pub carousel_bound: bool,
}

/// One page view: the page plus every component bound to it.
pub struct Site<S: ContentSource, K: KeyValueStore, T: RenderTarget> {
    loader: ContentLoader<S>,
    theme: ThemeController<K>,
    page: T,
    paths: ContentPaths,
    carousel: Option<Carousel>,
}

impl<S: ContentSource, K: KeyValueStore, T: RenderTarget> Site<S, K, T> {
    pub fn new(source: S, theme: ThemeController<K>, page: T) -> Self {
        Self {
            loader: ContentLoader::new(source),
            theme,
            page,
            paths: ContentPaths::default(),
            carousel: None,
        }
    }

    pub fn with_paths(mut self, paths: ContentPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn page(&self) -> &T {
        &self.page
    }

    pub fn theme(&self) -> &ThemeController<K> {
        &self.theme
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    /// Work that happens before any content arrives.
    fn prepare(&mut self) {
        self.page.set_class(Scope::Root, SCRIPT_ENABLED_CLASS, true);
        self.theme.init(&mut self.page);
    }

    pub async fn load_listing(&mut self) -> ListingSummary {
        self.prepare();
        navigation::observe_sections(&mut self.page);

        let skills: Vec<Skill> = self
            .loader
            .load_list_or(&self.paths.skills[..], default_skills())
            .await;
        let projects: Vec<Project> = self
            .loader
            .load_list_or(&self.paths.projects[..], default_projects())
            .await;

        renderer::render_skills(&mut self.page, &skills);
        self.replace_projects(&projects);

        let summary = ListingSummary {
            skills: skills.len(),
            projects: projects.len(),
            carousel_bound: self.carousel.is_some(),
        };
        tracing::info!(
            "Listing rendered: {} skills, {} projects",
            summary.skills,
            summary.projects
        );
        summary
    }

    /// Re-render the slide set; the previous carousel is dropped with it.
    pub fn replace_projects(&mut self, projects: &[Project]) {
        self.carousel = renderer::render_projects(&mut self.page, projects);
    }

    pub async fn load_detail(&mut self, page_url: &str) -> Option<Resolution> {
        self.prepare();
        detail::render_detail(&self.loader, &mut self.page, page_url).await
    }

    pub fn toggle_theme(&mut self) -> Result<ThemeMode> {
        self.theme.toggle(&mut self.page)
    }

    /// Deliver an input to the current carousel; `false` if none is bound.
    pub fn carousel_input(&mut self, input: CarouselInput) -> bool {
        match self.carousel.as_mut() {
            Some(carousel) => {
                carousel.handle(input, &mut self.page);
                true
            }
            None => false,
        }
    }

    pub fn follow_anchor(&mut self, href: &str) -> bool {
        navigation::follow_anchor(&mut self.page, href)
    }

    pub fn section_intersected(&mut self, id: &str, ratio: f64) -> bool {
        navigation::section_intersected(&mut self.page, id, ratio)
    }
}
