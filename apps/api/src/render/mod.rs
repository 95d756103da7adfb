pub mod composer;
pub mod document;
pub mod export;
pub mod handlers;
pub mod preview;
pub mod sections;

pub use composer::compose;
pub use export::{export_document, DirectorySink, ExportError, ExportSink, ExportedFile};
pub use preview::{render_preview, PreviewTree};
