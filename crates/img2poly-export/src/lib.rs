//! img2poly-export: Pure presenters (sans-IO)
//!
//! Turns pipeline output into text. Supports the plain-text report
//! (pixel drawing plus polygon listing), structured JSON, and an SVG
//! preview of the traced loop.

pub mod json;
pub mod svg;
pub mod text;

pub use json::to_json;
pub use svg::{SvgMetadata, to_svg};
pub use text::{render_pixels, render_polygon, render_report};
