use clap::Parser;
use portfolio_site::config::{Cli, Command};
use portfolio_site::core::carousel::parse_inputs;
use portfolio_site::core::detail::Resolution;
use portfolio_site::domain::ports::{Anchor, ContentSource};
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{
    ContentBase, FileSource, FileStore, HttpSource, InMemoryPage, Site, SiteError, ThemeController,
};

fn fail(e: &SiteError, code: i32) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    let config = cli.site_config().unwrap_or_else(|e| fail(&e, 1));
    if let Err(e) = config.validate() {
        fail(&e, 1);
    }

    let source: Box<dyn ContentSource> = match config.content_base() {
        ContentBase::Url(url) => {
            Box::new(HttpSource::new(&url).unwrap_or_else(|e| fail(&e, 1)))
        }
        ContentBase::Directory(dir) => Box::new(FileSource::new(dir)),
    };
    let store = FileStore::open(&config.theme.state_file);
    let theme = ThemeController::with_key(store, config.theme.key.clone());

    match cli.command {
        Command::Index => {
            let mut site = Site::new(source, theme, InMemoryPage::listing())
                .with_paths(config.content_paths());
            let summary = site.load_listing().await;
            println!("{}", site.page().snapshot());
            println!(
                "✅ {} skills, {} projects, carousel {}",
                summary.skills,
                summary.projects,
                if summary.carousel_bound { "bound" } else { "not bound" }
            );
        }
        Command::Project { id, url } => {
            let page_url = Cli::project_url(id.as_deref(), url.as_deref());
            let mut site = Site::new(source, theme, InMemoryPage::detail());
            let resolution = site.load_detail(&page_url).await;
            println!("{}", site.page().snapshot());
            match resolution {
                Some(Resolution::Found(project)) => println!("✅ Rendered {}", project.id),
                Some(Resolution::NotFound) => println!("⚠️  Project not found for {}", page_url),
                None => println!("⚠️  Page has no project container"),
            }
        }
        Command::Theme { toggle } => {
            let mut page = InMemoryPage::listing();
            let mut theme = theme;
            theme.init(&mut page);
            if toggle {
                theme.toggle(&mut page).unwrap_or_else(|e| fail(&e, 2));
            }
            println!("{} {}", theme.mode().glyph(), theme.mode());
        }
        Command::Carousel { inputs } => {
            let inputs = match parse_inputs(&inputs) {
                Ok(inputs) => inputs,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(2);
                }
            };

            let mut site = Site::new(source, theme, InMemoryPage::listing())
                .with_paths(config.content_paths());
            site.load_listing().await;

            for input in inputs {
                let label = format!("{:?}", input);
                if !site.carousel_input(input) {
                    println!("⚠️  No carousel on the page");
                    break;
                }
                if let Some(carousel) = site.carousel() {
                    println!(
                        "{:<60} index={} transform={}",
                        label,
                        carousel.index(),
                        site.page()
                            .style(Anchor::CarouselTrack, "transform")
                            .unwrap_or("-")
                    );
                }
            }
        }
    }

    Ok(())
}
