use crate::core::loader::{list_or_default, ContentLoader};
use crate::core::markup;
use crate::domain::model::Project;
use crate::domain::ports::{Anchor, ContentSource, RenderTarget};
use url::Url;

pub const DETAIL_DOCUMENT: &str = "/content/projects.json";
pub const ID_PARAM: &str = "id";

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Project),
    NotFound,
}

/// Value of the `id` query parameter. Relative page addresses such as
/// `project.html?id=x` or `?id=x` are accepted.
pub fn query_id(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).or_else(|_| {
        Url::parse("http://localhost/").and_then(|base| base.join(page_url))
    });
    match url {
        Ok(url) => url
            .query_pairs()
            .find(|(name, _)| name == ID_PARAM)
            .map(|(_, value)| value.into_owned()),
        Err(e) => {
            tracing::warn!("Could not parse page address {}: {}", page_url, e);
            None
        }
    }
}

pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

pub async fn resolve<S: ContentSource>(loader: &ContentLoader<S>, id: Option<&str>) -> Resolution {
    let outcome = loader.load_first(&[DETAIL_DOCUMENT]).await;
    let Some(document) = outcome.document else {
        return Resolution::NotFound;
    };
    let projects: Vec<Project> = list_or_default(document, Vec::new());

    match id.and_then(|id| find_project(&projects, id)) {
        Some(project) => Resolution::Found(project.clone()),
        None => {
            tracing::info!("No project with id {:?}", id);
            Resolution::NotFound
        }
    }
}

/// Resolve the page's project and render it into the detail container.
/// Returns `None` without loading anything if the page has no container.
pub async fn render_detail<S: ContentSource>(
    loader: &ContentLoader<S>,
    target: &mut dyn RenderTarget,
    page_url: &str,
) -> Option<Resolution> {
    if !target.has(Anchor::ProjectDetail) {
        tracing::debug!("No project detail container on this page");
        return None;
    }

    let id = query_id(page_url);
    let resolution = resolve(loader, id.as_deref()).await;
    let html = match &resolution {
        Resolution::Found(project) => markup::project_detail(project),
        Resolution::NotFound => markup::not_found(),
    };
    target.render_content(Anchor::ProjectDetail, html);
    Some(resolution)
}
