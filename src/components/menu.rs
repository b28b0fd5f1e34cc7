//! Navigation menu

use crate::helpers::link_to;

/// A single navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: &'static str,
}

/// Navigation entries, in display order
pub const NAV_LINKS: [MenuItem; 4] = [
    MenuItem { label: "Home", route: "/" },
    MenuItem { label: "About", route: "/about" },
    MenuItem { label: "Services", route: "/services" },
    MenuItem { label: "Posts", route: "/posts" },
];

/// Render the site navigation
pub fn render_menu() -> String {
    let mut html = String::from("<nav>\n<ul class=\"menu\">\n");
    for item in &NAV_LINKS {
        html.push_str("<li>");
        html.push_str(&link_to(item.route, item.label));
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</nav>");
    html
}
