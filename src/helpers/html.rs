//! HTML helper functions

/// Escape text for use between tags
///
/// # Examples
/// ```ignore
/// escape_html("Fish & Chips") // -> "Fish &amp; Chips"
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate an anchor tag
///
/// Both `path` and `text` are escaped; `path` is used as given.
///
/// # Examples
/// ```ignore
/// link_to("/about", "About") // -> <a href="/about">About</a>
/// ```
pub fn link_to(path: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape_html(path), escape_html(text))
}
