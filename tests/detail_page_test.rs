use anyhow::Result;
use httpmock::prelude::*;
use portfolio_site::core::detail::{render_detail, Resolution};
use portfolio_site::domain::ports::Anchor;
use portfolio_site::{ContentLoader, FileSource, HttpSource, InMemoryPage};
use tempfile::TempDir;

fn projects_document() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "project-1",
            "title": "Weather Station",
            "description": "Sensors on a balcony.",
            "longDescription": "Collects readings every minute & <charts> them.",
            "tech": ["Rust", "MQTT"],
            "codeUrl": "https://example.com/weather",
            "imageUrl": "img/weather.jpg"
        },
        {
            "id": "project-2",
            "title": "Ledger",
            "description": "Household budget.",
            "longDescription": "",
            "tech": [],
            "demoUrl": "https://ledger.example.com",
            "imageUrl": "img/ledger.jpg"
        }
    ])
}

fn content_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("content"))?;
    std::fs::write(
        dir.path().join("content/projects.json"),
        serde_json::to_vec(&projects_document())?,
    )?;
    Ok(dir)
}

#[tokio::test]
async fn test_renders_matching_project() -> Result<()> {
    let dir = content_dir()?;
    let loader = ContentLoader::new(FileSource::new(dir.path()));
    let mut page = InMemoryPage::detail();

    let resolution = render_detail(&loader, &mut page, "project.html?id=project-1").await;
    assert!(matches!(resolution, Some(Resolution::Found(ref p)) if p.id == "project-1"));

    let html = page.inner_html(Anchor::ProjectDetail).unwrap();
    assert!(html.contains("<h1>Weather Station</h1>"));
    assert!(html.contains("Sensors on a balcony."));
    assert!(html.contains("Collects readings every minute &amp; &lt;charts&gt; them."));
    assert!(html.contains(r#"<span class="skill-card">Rust</span> <span class="skill-card">MQTT</span>"#));
    assert!(html.contains("View Code"));
    assert!(!html.contains("Live Demo"));
    Ok(())
}

#[tokio::test]
async fn test_missing_id_renders_not_found() -> Result<()> {
    let dir = content_dir()?;
    let loader = ContentLoader::new(FileSource::new(dir.path()));

    for address in ["project.html?id=missing", "project.html?id=PROJECT-1", "project.html"] {
        let mut page = InMemoryPage::detail();
        let resolution = render_detail(&loader, &mut page, address).await;
        assert_eq!(resolution, Some(Resolution::NotFound), "{}", address);
        let html = page.inner_html(Anchor::ProjectDetail).unwrap();
        assert!(html.contains("Project not found"));
        assert!(html.contains(r#"href="/index.html#projects""#));
    }
    Ok(())
}

#[tokio::test]
async fn test_unloadable_document_renders_not_found() -> Result<()> {
    let empty = TempDir::new()?;
    let loader = ContentLoader::new(FileSource::new(empty.path()));
    let mut page = InMemoryPage::detail();

    let resolution = render_detail(&loader, &mut page, "?id=project-1").await;
    assert_eq!(resolution, Some(Resolution::NotFound));
    assert!(page
        .inner_html(Anchor::ProjectDetail)
        .unwrap()
        .contains("Project not found"));
    Ok(())
}

#[tokio::test]
async fn test_page_without_container_is_untouched() -> Result<()> {
    let server = MockServer::start();
    let document = server.mock(|when, then| {
        when.method(GET).path("/content/projects.json");
        then.status(200).json_body(projects_document());
    });

    let loader = ContentLoader::new(HttpSource::new(&server.url("/"))?);
    let mut page = InMemoryPage::listing();
    assert_eq!(render_detail(&loader, &mut page, "?id=project-1").await, None);
    document.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_detail_uses_root_absolute_document() -> Result<()> {
    let server = MockServer::start();
    let document = server.mock(|when, then| {
        when.method(GET).path("/content/projects.json");
        then.status(200).json_body(projects_document());
    });

    let loader = ContentLoader::new(HttpSource::new(&server.url("/nested/deep/project.html"))?);
    let mut page = InMemoryPage::detail();
    let resolution =
        render_detail(&loader, &mut page, "https://me.example.com/project.html?id=project-2").await;

    document.assert();
    assert!(matches!(resolution, Some(Resolution::Found(ref p)) if p.title == "Ledger"));
    let html = page.inner_html(Anchor::ProjectDetail).unwrap();
    assert!(html.contains("Live Demo"));
    assert!(!html.contains("View Code"));
    Ok(())
}

#[tokio::test]
async fn test_sparse_entry_resolves_beside_broken_sibling() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("content"))?;
    std::fs::write(
        dir.path().join("content/projects.json"),
        r#"[{"id":"a","title":"Alpha","description":null},{"title":"no id"}]"#,
    )?;

    let loader = ContentLoader::new(FileSource::new(dir.path()));
    let mut page = InMemoryPage::detail();
    let resolution = render_detail(&loader, &mut page, "project.html?id=a").await;

    assert!(matches!(resolution, Some(Resolution::Found(ref p)) if p.title == "Alpha" && p.description.is_empty()));
    assert!(page
        .inner_html(Anchor::ProjectDetail)
        .unwrap()
        .contains("<h1>Alpha</h1>"));
    Ok(())
}

#[tokio::test]
async fn test_untitled_project_still_renders() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("content"))?;
    std::fs::write(dir.path().join("content/projects.json"), r#"[{"id":"bare"}]"#)?;

    let loader = ContentLoader::new(FileSource::new(dir.path()));
    let mut page = InMemoryPage::detail();
    let resolution = render_detail(&loader, &mut page, "?id=bare").await;

    assert!(matches!(resolution, Some(Resolution::Found(ref p)) if p.id == "bare" && p.title.is_empty()));
    assert!(page.inner_html(Anchor::ProjectDetail).unwrap().contains("<h1></h1>"));
    Ok(())
}
