//! Markup fragments for skills, project slides, indicators and the detail
//! page. Every interpolated record field passes through [`escape_html`].

use crate::domain::model::{Project, Skill};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const TECH_SEPARATOR: &str = " • ";
pub const PROJECTS_LINK: &str = "/index.html#projects";

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Bytes `encodeURIComponent` escapes: everything but ASCII alphanumerics
/// and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

pub fn skill_card(skill: &Skill) -> String {
    format!(r#"<div class="skill-card">{}</div>"#, escape_html(skill.label()))
}

pub fn project_slide(project: &Project) -> String {
    format!(
        r#"<div class="carousel-slide">
  <article class="project-card">
    <div class="project-image" style="background-image: url('{image}')"></div>
    <div class="project-info">
      <h3>{title}</h3>
      <p>{tech}</p>
      <div class="project-actions">
        <a class="btn primary" href="project.html?id={id}">View Details</a>
      </div>
    </div>
  </article>
</div>"#,
        image = escape_html(&project.image_url),
        title = escape_html(&project.title),
        tech = escape_html(&project.tech.join(TECH_SEPARATOR)),
        id = encode_uri_component(&project.id),
    )
}

pub fn indicator(position: usize) -> String {
    let current = if position == 0 {
        r#" aria-current="true""#
    } else {
        ""
    };
    format!(
        r#"<button class="carousel-dot" aria-label="Go to slide {}"{}></button>"#,
        position + 1,
        current
    )
}

pub fn project_detail(project: &Project) -> String {
    let tech = project
        .tech
        .iter()
        .map(|t| format!(r#"<span class="skill-card">{}</span>"#, escape_html(t)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut links = String::new();
    if let Some(demo) = project.demo_url.as_deref().filter(|u| !u.is_empty()) {
        links.push_str(&format!(
            r#"<a class="btn primary" href="{}" target="_blank" rel="noopener">Live Demo</a>"#,
            escape_html(demo)
        ));
    }
    if let Some(code) = project.code_url.as_deref().filter(|u| !u.is_empty()) {
        links.push_str(&format!(
            r#"<a class="btn secondary" href="{}" target="_blank" rel="noopener">View Code</a>"#,
            escape_html(code)
        ));
    }

    format!(
        r#"<div class="project-hero" style="background-image: url('{image}')"></div>
<div class="project-info">
  <h1>{title}</h1>
  <p class="muted">{description}</p>
  <p>{long_description}</p>
  <div class="project-meta">
    <div class="project-tech">{tech}</div>
    <div class="project-links">{links}</div>
  </div>
  <p><a href="{back}">← Back to projects</a></p>
</div>"#,
        image = escape_html(&project.image_url),
        title = escape_html(&project.title),
        description = escape_html(&project.description),
        long_description = escape_html(&project.long_description),
        tech = tech,
        links = links,
        back = PROJECTS_LINK,
    )
}

pub fn not_found() -> String {
    format!(
        r#"<div class="project-info">
  <h2>Project not found</h2>
  <p>We couldn't find the project you were looking for.</p>
  <p><a href="{}">Back to projects</a></p>
</div>"#,
        PROJECTS_LINK
    )
}
