use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Only `id` is required; absent or `null` text fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A skill is just its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skill(pub String);

impl Skill {
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Skill {
    fn from(label: &str) -> Self {
        Skill(label.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Only the exact value `"light"` selects light mode; anything else is dark.
    pub fn from_persisted(value: Option<&str>) -> Self {
        match value {
            Some("light") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀️",
            ThemeMode::Dark => "🌙",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn default_skills() -> Vec<Skill> {
    ["HTML5", "CSS3", "JavaScript", "React", "Node.js", "Git"]
        .into_iter()
        .map(Skill::from)
        .collect()
}

pub fn default_projects() -> Vec<Project> {
    vec![Project {
        id: "project-1".to_string(),
        title: "Project One".to_string(),
        description: "A cool project description goes here.".to_string(),
        long_description:
            "Detailed description for Project One. Add more context, screenshots, and links here."
                .to_string(),
        tech: vec!["HTML".to_string(), "CSS".to_string(), "JavaScript".to_string()],
        demo_url: Some("#".to_string()),
        code_url: Some("#".to_string()),
        image_url: "src/image/ab8758831428e8012e39fd4f73d93487.jpg".to_string(),
    }]
}
