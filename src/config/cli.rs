use crate::config::site::SiteConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio")]
#[command(about = "Render and drive the portfolio pages against an in-memory page")]
pub struct Cli {
    /// Path to a TOML site configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the content base (directory or http(s) URL)
    #[arg(long, global = true)]
    pub content: Option<String>,

    /// Override the file used as persistent theme storage
    #[arg(long, global = true)]
    pub state: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load the listing page and print the rendered skills and carousel
    Index,
    /// Render the detail page for one project
    Project {
        /// Project identifier, as passed in `?id=`
        #[arg(long, conflicts_with = "url")]
        id: Option<String>,
        /// Full page address to read the query from
        #[arg(long)]
        url: Option<String>,
    },
    /// Show the persisted theme, optionally toggling it
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Replay carousel input, e.g. `next,dot:2,focus,left,drag:-80,cancel`
    Carousel {
        #[arg(long)]
        inputs: String,
    },
}

impl Cli {
    /// File configuration (or defaults) with command-line overrides applied.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };
        if let Some(content) = &self.content {
            config.content.base = content.clone();
        }
        if let Some(state) = &self.state {
            config.theme.state_file = state.clone();
        }
        Ok(config)
    }

    /// Page address for the `project` command.
    pub fn project_url(id: Option<&str>, url: Option<&str>) -> String {
        match (id, url) {
            (_, Some(url)) => url.to_string(),
            (Some(id), None) => format!(
                "project.html?id={}",
                crate::core::markup::encode_uri_component(id)
            ),
            (None, None) => "project.html".to_string(),
        }
    }
}
