//! Page components
//!
//! Each component is a pure function from borrowed, already resolved data
//! to an HTML fragment. Rendering the same input twice yields the same
//! bytes.

mod layout;
mod menu;
mod post_detail;
mod post_index;

pub use layout::render_layout;
pub use menu::{render_menu, MenuItem, NAV_LINKS};
pub use post_detail::render_post_detail;
pub use post_index::{render_post_index, INDEX_HEADING};
