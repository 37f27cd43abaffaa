use crate::core::site::ContentPaths;
use crate::core::theme::THEME_KEY;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Site root: an http(s) URL or a local directory.
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    #[serde(default = "default_projects")]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_key")]
    pub key: String,
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

fn default_base() -> String {
    ".".to_string()
}

fn default_skills() -> Vec<String> {
    ContentPaths::default().skills
}

fn default_projects() -> Vec<String> {
    ContentPaths::default().projects
}

fn default_theme_key() -> String {
    THEME_KEY.to_string()
}

fn default_state_file() -> String {
    ".portfolio-state.json".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            skills: default_skills(),
            projects: default_projects(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            key: default_theme_key(),
            state_file: default_state_file(),
        }
    }
}

/// Where content documents come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBase {
    Url(String),
    Directory(PathBuf),
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are kept as-is.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn content_base(&self) -> ContentBase {
        let base = self.content.base.trim();
        if base.starts_with("http://") || base.starts_with("https://") {
            ContentBase::Url(base.to_string())
        } else {
            ContentBase::Directory(PathBuf::from(base))
        }
    }

    pub fn content_paths(&self) -> ContentPaths {
        ContentPaths {
            skills: self.content.skills.clone(),
            projects: self.content.projects.clone(),
        }
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        match self.content_base() {
            ContentBase::Url(url) => validation::validate_url("content.base", &url)?,
            ContentBase::Directory(dir) => {
                validation::validate_path("content.base", &dir.to_string_lossy())?
            }
        }
        validation::validate_candidates("content.skills", &self.content.skills)?;
        validation::validate_candidates("content.projects", &self.content.projects)?;
        validation::validate_non_empty_string("theme.key", &self.theme.key)?;
        validation::validate_path("theme.state_file", &self.theme.state_file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_uses_page_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config.content_paths(), ContentPaths::default());
        assert_eq!(config.theme.key, "theme");
        assert_eq!(config.content_base(), ContentBase::Directory(PathBuf::from(".")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_url_base_and_custom_candidates() {
        let config = SiteConfig::from_toml_str(
            r#"
[content]
base = "https://me.example.com/"
projects = ["data/projects.json"]

[theme]
state_file = "/tmp/portfolio.json"
"#,
        )
        .unwrap();
        assert_eq!(
            config.content_base(),
            ContentBase::Url("https://me.example.com/".to_string())
        );
        assert_eq!(config.content.projects, vec!["data/projects.json".to_string()]);
        assert_eq!(config.content.skills, ContentPaths::default().skills);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("PORTFOLIO_TEST_BASE", "https://cdn.example.com/site/");
        let config =
            SiteConfig::from_toml_str("[content]\nbase = \"${PORTFOLIO_TEST_BASE}\"\n").unwrap();
        assert_eq!(config.content.base, "https://cdn.example.com/site/");
        std::env::remove_var("PORTFOLIO_TEST_BASE");
    }

    #[test]
    fn rejects_invalid_settings() {
        let config =
            SiteConfig::from_toml_str("[content]\nskills = []\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            SiteConfig::from_toml_str("[content]\nprojects = [\"projects.csv\"]\n").unwrap();
        assert!(config.validate().is_err());

        assert!(SiteConfig::from_toml_str("[content\n").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[theme]\nkey = \"site-theme\"").unwrap();
        let config = SiteConfig::from_file(file.path()).unwrap();
        assert_eq!(config.theme.key, "site-theme");
    }
}
