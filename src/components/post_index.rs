//! Post index page

use crate::content::PostSummary;
use crate::helpers::link_to;

/// Heading of the post index
pub const INDEX_HEADING: &str = "All Blog posts";

/// Render one link per post, in the order given
///
/// Fields are rendered as they are; an empty path yields an empty `href`.
pub fn render_post_index(posts: &[PostSummary]) -> String {
    let mut html = format!("<h1>{}</h1>\n<ul>\n", INDEX_HEADING);
    for post in posts {
        let text = format!("{} | By - {} | On {}", post.title, post.author, post.date);
        html.push_str("<li>");
        html.push_str(&link_to(&post.path, &text));
        html.push_str("</li>\n");
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, path: &str, title: &str) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            path: path.to_string(),
            title: title.to_string(),
            author: "Ann".to_string(),
            date: "2020-01-01".to_string(),
        }
    }

    #[test]
    fn test_empty_index() {
        let html = render_post_index(&[]);
        assert!(html.contains("<h1>All Blog posts</h1>"));
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn test_single_post() {
        let html = render_post_index(&[summary("1", "/p1", "Hello")]);
        assert_eq!(html.matches("<li>").count(), 1);
        assert!(html.contains(r#"<a href="/p1">Hello | By - Ann | On 2020-01-01</a>"#));
    }

    #[test]
    fn test_input_order_is_kept() {
        let posts = vec![
            summary("3", "/c", "Gamma"),
            summary("1", "/a", "Alpha"),
            summary("2", "/b", "Beta"),
        ];
        let html = render_post_index(&posts);
        assert_eq!(html.matches("<li>").count(), 3);

        let gamma = html.find("Gamma").unwrap();
        let alpha = html.find("Alpha").unwrap();
        let beta = html.find("Beta").unwrap();
        assert!(gamma < alpha && alpha < beta);
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_post_index(&[summary("1", "/x", "<script>")]);
        assert!(html.contains("&lt;script&gt; | By - Ann"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_missing_fields_render_blank() {
        let post = PostSummary {
            id: "1".to_string(),
            path: String::new(),
            title: String::new(),
            author: String::new(),
            date: String::new(),
        };
        let html = render_post_index(&[post]);
        assert!(html.contains(r#"<a href=""> | By -  | On </a>"#));
    }

    #[test]
    fn test_render_is_idempotent() {
        let posts = vec![summary("1", "/p1", "Hello")];
        assert_eq!(render_post_index(&posts), render_post_index(&posts));
    }
}
