//! Single post template

use crate::content::PostDetail;
use crate::helpers::escape_html;

/// Render a post's heading block and body
///
/// `body_html` is trusted markup and goes into the page byte for byte.
pub fn render_post_detail(post: &PostDetail) -> String {
    format!(
        "<div>\n<h1>{}</h1>\n<h4>Posted By {} on {}</h4>\n<div>{}</div>\n</div>",
        escape_html(&post.title),
        escape_html(&post.author),
        escape_html(&post.date),
        post.body_html.as_str()
    )
}
