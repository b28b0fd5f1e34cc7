//! Generator module - writes the rendered pages to the public directory

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::content::PostStore;
use crate::pages::{self, POSTS_ROUTE};
use crate::Blog;

/// Outcome of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Post pages written
    pub posts: usize,
    /// Posts whose route could not be written
    pub skipped: usize,
    /// Static files copied
    pub assets: usize,
}

/// Static site generator
pub struct Generator<'a> {
    blog: &'a Blog,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Generate the entire site
    pub fn generate(&self, store: &PostStore) -> Result<GenerateReport> {
        let public_dir = &self.blog.public_dir;
        let config = &self.blog.config;
        let mut report = GenerateReport::default();

        fs::create_dir_all(public_dir)?;

        // Static assets go first so generated pages win on conflicts
        report.assets = self.copy_static_assets()?;

        let mut written: HashSet<PathBuf> = HashSet::new();

        let index_file = route_to_file(public_dir, POSTS_ROUTE)
            .ok_or_else(|| anyhow::anyhow!("Invalid index route {}", POSTS_ROUTE))?;
        write_page(&index_file, &pages::index_page(config, store))?;
        written.insert(index_file);

        let not_found_file = public_dir.join("404.html");
        write_page(&not_found_file, &pages::not_found_page(config, None))?;
        written.insert(not_found_file);

        for post in store.posts() {
            let Some(file) = route_to_file(public_dir, &post.path) else {
                tracing::warn!(
                    "Skipping {}: path {:?} cannot be written as a page",
                    post.id,
                    post.path
                );
                report.skipped += 1;
                continue;
            };

            if !written.insert(file.clone()) {
                tracing::warn!(
                    "Skipping {}: path {:?} collides with another page",
                    post.id,
                    post.path
                );
                report.skipped += 1;
                continue;
            }

            write_page(&file, &pages::detail_page(config, &post.detail()))?;
            tracing::debug!("Generated {:?}", file);
            report.posts += 1;
        }

        // A post at `/` owns the home page; otherwise Home leads to the index
        let home_file = public_dir.join("index.html");
        if !written.contains(&home_file) {
            write_page(&home_file, &pages::home_redirect_page())?;
        }

        Ok(report)
    }

    /// Copy everything under the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }
}

/// Map a route to the file that serves it
///
/// `/a/b` becomes `a/b/index.html`, `/a/b.html` stays a file. Returns
/// `None` for an empty route or one that would escape the public dir.
pub fn route_to_file(public_dir: &Path, route: &str) -> Option<PathBuf> {
    let route = route.trim();
    if route.is_empty() {
        return None;
    }

    let relative = Path::new(route.trim_start_matches('/'));
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let target = public_dir.join(relative);
    if route.ends_with(".html") {
        Some(target)
    } else {
        Some(target.join("index.html"))
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn blog_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());
        fs::create_dir_all(&blog.content_dir).unwrap();
        for (name, content) in posts {
            fs::write(blog.content_dir.join(name), content).unwrap();
        }
        (dir, blog)
    }

    #[test]
    fn test_route_to_file() {
        let public = Path::new("/site/public");
        assert_eq!(
            route_to_file(public, "/p1"),
            Some(PathBuf::from("/site/public/p1/index.html"))
        );
        assert_eq!(
            route_to_file(public, "/blog/p1/"),
            Some(PathBuf::from("/site/public/blog/p1/index.html"))
        );
        assert_eq!(
            route_to_file(public, "/old.html"),
            Some(PathBuf::from("/site/public/old.html"))
        );
        assert_eq!(
            route_to_file(public, "/"),
            Some(PathBuf::from("/site/public/index.html"))
        );
        assert_eq!(route_to_file(public, ""), None);
        assert_eq!(route_to_file(public, "/../etc"), None);
    }

    #[test]
    fn test_generate_site() {
        let (_dir, blog) = blog_with_posts(&[
            (
                "hello.md",
                "---\ntitle: Hello\nauthor: Ann\ndate: 2020-01-01\npath: /p1\n---\nHi",
            ),
            ("escape.md", "---\ntitle: Escape\npath: /../outside\n---\n"),
            ("clash.md", "---\ntitle: Clash\npath: /posts\n---\n"),
        ]);
        fs::create_dir_all(blog.static_dir.join("css")).unwrap();
        fs::write(blog.static_dir.join("css/site.css"), "body {}").unwrap();

        let store = blog.load_store().unwrap();
        let report = Generator::new(&blog).generate(&store).unwrap();

        assert_eq!(
            report,
            GenerateReport {
                posts: 1,
                skipped: 2,
                assets: 1
            }
        );

        let index = fs::read_to_string(blog.public_dir.join("posts/index.html")).unwrap();
        assert!(index.contains(r#"<a href="/p1">Hello | By - Ann | On 2020-01-01</a>"#));

        let post = fs::read_to_string(blog.public_dir.join("p1/index.html")).unwrap();
        assert!(post.contains("<h4>Posted By Ann on 2020-01-01</h4>"));
        assert!(post.contains("<p>Hi</p>"));

        assert!(blog.public_dir.join("404.html").exists());
        assert!(blog.public_dir.join("css/site.css").exists());

        let home = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(home.contains("url=/posts"));
    }

    #[test]
    fn test_post_at_root_owns_home_page() {
        let (_dir, blog) = blog_with_posts(&[(
            "welcome.md",
            "---\ntitle: Welcome\npath: /\n---\nHello there",
        )]);
        let store = blog.load_store().unwrap();
        let report = Generator::new(&blog).generate(&store).unwrap();
        assert_eq!(report.posts, 1);

        let home = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(home.contains("Hello there"));
        assert!(!home.contains("url=/posts"));
    }

    #[test]
    fn test_post_cannot_replace_not_found_page() {
        let (_dir, blog) = blog_with_posts(&[(
            "missing.md",
            "---\ntitle: Missing\npath: /404.html\n---\nMY BODY",
        )]);
        let store = blog.load_store().unwrap();
        let report = Generator::new(&blog).generate(&store).unwrap();

        assert_eq!(report.posts, 0);
        assert_eq!(report.skipped, 1);

        let not_found = fs::read_to_string(blog.public_dir.join("404.html")).unwrap();
        assert!(not_found.contains("<h1>Page not found</h1>"));
        assert!(!not_found.contains("MY BODY"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let (_dir, blog) = blog_with_posts(&[(
            "hello.md",
            "---\ntitle: Hello\ndate: 2020-01-01\npath: /p1\n---\nHi",
        )]);
        let store = blog.load_store().unwrap();
        let generator = Generator::new(&blog);

        generator.generate(&store).unwrap();
        let first = fs::read(blog.public_dir.join("p1/index.html")).unwrap();
        generator.generate(&store).unwrap();
        let second = fs::read(blog.public_dir.join("p1/index.html")).unwrap();
        assert_eq!(first, second);
    }
}
