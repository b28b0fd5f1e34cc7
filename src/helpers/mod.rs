//! Helper functions for building markup

mod html;

pub use html::*;
