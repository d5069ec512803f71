//! Page signal extraction
//!
//! This module turns a rendered document into structured signals: cleaned
//! body text, headings, same-origin links, image and script counts.

pub mod extractor;
pub mod js_scripts;
pub mod schema;

pub use extractor::render;
pub use schema::{HeadingElement, PageLink, PageSignal, RenderOptions};
