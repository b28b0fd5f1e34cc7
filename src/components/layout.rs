//! Page shell shared by every generated page

use crate::config::SiteConfig;
use crate::helpers::{escape_html, link_to};

use super::render_menu;

/// Wrap a component fragment in a full HTML document
///
/// The document title is `"{page_title} | {site title}"`, or just the site
/// title when `page_title` is empty.
pub fn render_layout(config: &SiteConfig, page_title: &str, content: &str) -> String {
    let title = if page_title.is_empty() {
        escape_html(&config.title)
    } else {
        format!("{} | {}", escape_html(page_title), escape_html(&config.title))
    };

    let description = if config.description.is_empty() {
        String::new()
    } else {
        format!(
            "\n<meta name=\"description\" content=\"{}\">",
            escape_html(&config.description)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>{description}
</head>
<body>
<header>
<p class="site-title">{home}</p>
{menu}
</header>
<main>
{content}
</main>
</body>
</html>
"#,
        title = title,
        description = description,
        home = link_to("/", &config.title),
        menu = render_menu(),
        content = content,
    )
}
