// Layout primitives shared by the composer and the preview renderer:
// page geometry, font metrics, template styles and text flow.
// Everything here is synchronous and free of shared state.

pub mod cursor;
pub mod font_metrics;
pub mod style;
pub mod text_flow;

// Re-export the public API consumed by the render and route modules.
pub use style::{catalog, TemplateStyle, DEFAULT_TEMPLATE_ID};
