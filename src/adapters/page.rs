use crate::domain::ports::{Anchor, RenderTarget, Scope};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::OnceLock;

/// A page held in memory: the fixed anchors, their rendered children and
/// the few element properties the components touch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPage {
    elements: BTreeMap<Anchor, Element>,
    root_classes: BTreeSet<String>,
    body_classes: BTreeSet<String>,
    sections: Vec<Section>,
    scrolled_to: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Element {
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    content: Option<String>,
    children: Vec<Child>,
    captured_pointer: Option<i32>,
}

#[derive(Debug, Clone)]
struct Section {
    id: String,
    classes: BTreeSet<String>,
}

/// One rendered fragment, split into its opening tag and the rest so
/// attributes can be changed after insertion.
#[derive(Debug, Clone, PartialEq)]
struct Child {
    tag: Option<String>,
    attributes: Vec<(String, String)>,
    rest: String,
}

fn opening_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)^<([a-zA-Z][a-zA-Z0-9-]*)((?:\s+[^\s=>/]+(?:="[^"]*")?)*)\s*>(.*)$"#)
            .expect("static regex")
    })
}

fn attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([^\s=>/]+)(?:="([^"]*)")?"#).expect("static regex"))
}

impl Child {
    fn parse(fragment: &str) -> Self {
        let fragment = fragment.trim();
        match opening_tag().captures(fragment) {
            Some(caps) => {
                let attributes = attribute()
                    .captures_iter(&caps[2])
                    .map(|a| {
                        let value = a.get(2).map(|m| m.as_str()).unwrap_or_default();
                        (a[1].to_string(), value.to_string())
                    })
                    .collect();
                Child {
                    tag: Some(caps[1].to_string()),
                    attributes,
                    rest: caps[3].to_string(),
                }
            }
            None => Child {
                tag: None,
                attributes: Vec::new(),
                rest: fragment.to_string(),
            },
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn to_html(&self) -> String {
        let Some(tag) = &self.tag else {
            return self.rest.clone();
        };
        let mut html = format!("<{}", tag);
        for (name, value) in &self.attributes {
            let _ = write!(html, " {}=\"{}\"", name, value);
        }
        html.push('>');
        html.push_str(&self.rest);
        html
    }
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchors(anchors: impl IntoIterator<Item = Anchor>) -> Self {
        let mut page = Self::new();
        for anchor in anchors {
            page.elements.insert(anchor, Element::default());
        }
        page
    }

    /// The landing page: every anchor except the detail container.
    pub fn listing() -> Self {
        Self::with_anchors(
            Anchor::ALL
                .into_iter()
                .filter(|a| *a != Anchor::ProjectDetail),
        )
        .with_sections(["about", "skills", "projects", "contact"])
    }

    pub fn detail() -> Self {
        Self::with_anchors([Anchor::ThemeToggle, Anchor::ProjectDetail])
            .with_sections(["project-detail"])
    }

    pub fn with_sections<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.sections.extend(ids.into_iter().map(|id| Section {
            id: id.to_string(),
            classes: BTreeSet::new(),
        }));
        self
    }

    pub fn attribute(&self, anchor: Anchor, name: &str) -> Option<&str> {
        self.elements
            .get(&anchor)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    pub fn child_attribute(&self, anchor: Anchor, index: usize, name: &str) -> Option<&str> {
        self.elements.get(&anchor)?.children.get(index)?.attribute(name)
    }

    pub fn style(&self, anchor: Anchor, property: &str) -> Option<&str> {
        self.elements
            .get(&anchor)?
            .style
            .get(property)
            .map(String::as_str)
    }

    pub fn text(&self, anchor: Anchor) -> Option<&str> {
        self.elements.get(&anchor)?.text.as_deref()
    }

    pub fn captured_pointer(&self, anchor: Anchor) -> Option<i32> {
        self.elements.get(&anchor)?.captured_pointer
    }

    pub fn section_has_class(&self, id: &str, class: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.id == id && s.classes.contains(class))
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    /// Inner markup of an anchor, `None` when the page lacks it.
    pub fn inner_html(&self, anchor: Anchor) -> Option<String> {
        let element = self.elements.get(&anchor)?;
        if let Some(content) = &element.content {
            return Some(content.clone());
        }
        Some(
            element
                .children
                .iter()
                .map(Child::to_html)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// Human-readable dump of every anchor, used by the CLI.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<html class=\"{}\"> <body class=\"{}\">",
            join(&self.root_classes),
            join(&self.body_classes)
        );
        for (anchor, element) in &self.elements {
            let _ = write!(out, "[{}]", anchor.selector());
            for (name, value) in &element.attributes {
                let _ = write!(out, " {}=\"{}\"", name, value);
            }
            if !element.style.is_empty() {
                let style = element
                    .style
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ");
                let _ = write!(out, " style=\"{}\"", style);
            }
            if let Some(text) = &element.text {
                let _ = write!(out, " text={:?}", text);
            }
            out.push('\n');
            if let Some(html) = self.inner_html(*anchor) {
                if !html.is_empty() {
                    out.push_str(&html);
                    out.push('\n');
                }
            }
        }
        for section in &self.sections {
            let _ = writeln!(out, "<section id=\"{}\" class=\"{}\">", section.id, join(&section.classes));
        }
        out
    }

    fn classes_mut(&mut self, scope: Scope) -> &mut BTreeSet<String> {
        match scope {
            Scope::Root => &mut self.root_classes,
            Scope::Body => &mut self.body_classes,
        }
    }
}

fn join(classes: &BTreeSet<String>) -> String {
    classes.iter().cloned().collect::<Vec<_>>().join(" ")
}

impl RenderTarget for InMemoryPage {
    fn has(&self, anchor: Anchor) -> bool {
        self.elements.contains_key(&anchor)
    }

    fn render_list(&mut self, anchor: Anchor, fragments: Vec<String>) -> bool {
        let Some(element) = self.elements.get_mut(&anchor) else {
            return false;
        };
        element.content = None;
        element.children = fragments.iter().map(|f| Child::parse(f)).collect();
        true
    }

    fn render_content(&mut self, anchor: Anchor, html: String) -> bool {
        let Some(element) = self.elements.get_mut(&anchor) else {
            return false;
        };
        element.children.clear();
        element.content = Some(html);
        true
    }

    fn child_count(&self, anchor: Anchor) -> usize {
        self.elements
            .get(&anchor)
            .map(|e| e.children.len())
            .unwrap_or(0)
    }

    fn set_attribute(&mut self, anchor: Anchor, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(&anchor) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_child_attribute(&mut self, anchor: Anchor, index: usize, name: &str, value: &str) {
        if let Some(child) = self
            .elements
            .get_mut(&anchor)
            .and_then(|e| e.children.get_mut(index))
        {
            child.set_attribute(name, value);
        }
    }

    fn set_style(&mut self, anchor: Anchor, property: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(&anchor) {
            if value.is_empty() {
                element.style.remove(property);
            } else {
                element.style.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn set_text(&mut self, anchor: Anchor, text: &str) {
        if let Some(element) = self.elements.get_mut(&anchor) {
            element.text = Some(text.to_string());
        }
    }

    fn set_class(&mut self, scope: Scope, class: &str, on: bool) {
        let classes = self.classes_mut(scope);
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, scope: Scope, class: &str) -> bool {
        match scope {
            Scope::Root => self.root_classes.contains(class),
            Scope::Body => self.body_classes.contains(class),
        }
    }

    fn capture_pointer(&mut self, anchor: Anchor, pointer_id: i32) {
        if let Some(element) = self.elements.get_mut(&anchor) {
            element.captured_pointer = Some(pointer_id);
        }
    }

    fn release_pointer(&mut self, anchor: Anchor, pointer_id: i32) {
        if let Some(element) = self.elements.get_mut(&anchor) {
            if element.captured_pointer == Some(pointer_id) {
                element.captured_pointer = None;
            }
        }
    }

    fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    fn set_section_class(&mut self, id: &str, class: &str) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            section.classes.insert(class.to_string());
        }
    }

    fn scroll_into_view(&mut self, id: &str) -> bool {
        if self.sections.iter().any(|s| s.id == id) {
            self.scrolled_to = Some(id.to_string());
            true
        } else {
            false
        }
    }
}
