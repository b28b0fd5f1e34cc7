//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a new post file and return its location
///
/// The file is named after the slugified title; `route` defaults to
/// `/<slug>` and `author` to the site author.
pub fn create_post(
    blog: &Blog,
    title: &str,
    author: Option<&str>,
    route: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&blog.content_dir)?;

    let file_path = blog.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let route = route
        .map(str::to_string)
        .unwrap_or_else(|| format!("/{}", slug));
    let author = author.unwrap_or(&blog.config.author);
    let date = chrono::Local::now().format("%Y-%m-%d");

    let content = format!(
        "---\npath: {}\ndate: \"{}\"\ntitle: {}\nauthor: {}\n---\n\n",
        yaml_string(&route),
        date,
        yaml_string(title),
        yaml_string(author)
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?} at route {}", file_path, route);

    Ok(file_path)
}

/// Quote a value as a YAML string
fn yaml_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}
