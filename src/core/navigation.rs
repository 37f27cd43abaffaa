use crate::domain::ports::RenderTarget;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const FADE_IN_CLASS: &str = "fade-in-section";
pub const VISIBLE_CLASS: &str = "visible";

/// Handle a click on an in-page link. Returns whether the click was taken
/// over (every `#...` link is, even when its target is missing).
pub fn follow_anchor(target: &mut dyn RenderTarget, href: &str) -> bool {
    let Some(id) = href.strip_prefix('#') else {
        return false;
    };
    if id.is_empty() || !target.scroll_into_view(id) {
        tracing::debug!("No scroll target for {}", href);
    }
    true
}

/// Tags every section for the fade-in effect.
pub fn observe_sections(target: &mut dyn RenderTarget) -> Vec<String> {
    let ids = target.section_ids();
    for id in &ids {
        target.set_section_class(id, FADE_IN_CLASS);
    }
    ids
}

/// Intersection callback: reveal once `ratio` reaches the threshold.
/// Sections stay revealed after scrolling away.
pub fn section_intersected(target: &mut dyn RenderTarget, id: &str, ratio: f64) -> bool {
    if ratio >= REVEAL_THRESHOLD {
        target.set_section_class(id, VISIBLE_CLASS);
        true
    } else {
        false
    }
}
