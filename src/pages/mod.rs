//! Page assembly: runs a query, renders a component, wraps it in the layout

use crate::components::{render_layout, render_post_detail, render_post_index, INDEX_HEADING};
use crate::config::SiteConfig;
use crate::content::{ContentResolver, PostDetail};
use crate::helpers::{escape_html, link_to};

/// Route of the post index
pub const POSTS_ROUTE: &str = "/posts";

/// Full HTML of the post index
pub fn index_page(config: &SiteConfig, resolver: &impl ContentResolver) -> String {
    let posts = resolver.post_summaries();
    render_layout(config, INDEX_HEADING, &render_post_index(&posts))
}

/// Full HTML of one post
pub fn detail_page(config: &SiteConfig, post: &PostDetail) -> String {
    render_layout(config, &post.title, &render_post_detail(post))
}

/// Full HTML of the post at `path`, or `None` when no post matches
pub fn post_page(
    config: &SiteConfig,
    resolver: &impl ContentResolver,
    path: &str,
) -> Option<String> {
    resolver.post_detail(path).map(|post| detail_page(config, &post))
}

/// Stand-in for `/` when no post claims it: sends the browser to the index
pub fn home_redirect_page() -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
            "<meta http-equiv=\"refresh\" content=\"0; url={0}\">\n",
            "<link rel=\"canonical\" href=\"{0}\">\n</head>\n",
            "<body><p>{1}</p></body>\n</html>\n"
        ),
        POSTS_ROUTE,
        link_to(POSTS_ROUTE, "All Blog posts")
    )
}

/// Full HTML of the not-found page
pub fn not_found_page(config: &SiteConfig, path: Option<&str>) -> String {
    let detail = match path {
        Some(path) => format!("<p>Nothing lives at <code>{}</code>.</p>\n", escape_html(path)),
        None => String::new(),
    };
    let content = format!(
        "<h1>Page not found</h1>\n{}<p>{}</p>",
        detail,
        link_to(POSTS_ROUTE, "Browse all posts")
    );
    render_layout(config, "Page not found", &content)
}
