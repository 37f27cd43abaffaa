use crate::core::carousel::Carousel;
use crate::core::markup;
use crate::domain::model::{Project, Skill};
use crate::domain::ports::{Anchor, RenderTarget};

pub fn render_skills(target: &mut dyn RenderTarget, skills: &[Skill]) {
    if !target.render_list(Anchor::SkillsGrid, skills.iter().map(markup::skill_card).collect()) {
        tracing::debug!("No skills grid on this page");
    }
}

/// Replace the slides and indicators, then bind a fresh carousel to them.
/// The returned controller supersedes any previous one.
pub fn render_projects(target: &mut dyn RenderTarget, projects: &[Project]) -> Option<Carousel> {
    if !target.render_list(
        Anchor::CarouselTrack,
        projects.iter().map(markup::project_slide).collect(),
    ) {
        tracing::debug!("No carousel track on this page");
        return None;
    }

    target.render_list(
        Anchor::CarouselDots,
        (0..projects.len()).map(markup::indicator).collect(),
    );

    Carousel::bind(target)
}
