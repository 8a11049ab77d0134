//! Board rendering
//!
//! Layout math is platform independent; the SVG renderer needs a DOM.

pub mod shapes;
#[cfg(target_arch = "wasm32")]
pub mod svg;

#[cfg(target_arch = "wasm32")]
pub use svg::SvgRenderer;
