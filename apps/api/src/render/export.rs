//! Export pipeline — serializes a composed document to PDF bytes.
//!
//! Pages use the four base-14 faces registered once in a shared resource
//! dictionary, with WinAnsi encoding. Characters outside WinAnsi are written
//! as `?`. Content streams are uncompressed.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::cursor::PageGeometry;
use crate::layout::font_metrics::FontFace;
use crate::layout::style::{Rgb, RuleStyle};
use crate::render::document::{Document, Page, Rect, Shape, TextRun};

pub const PDF_EXTENSION: &str = "pdf";
pub const PDF_MIME: &str = "application/pdf";
/// Used when the caller supplies no title.
pub const DEFAULT_FILENAME: &str = "resume";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished file ready to be handed to a save mechanism.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    /// Name including the `.pdf` extension.
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Where exported files end up. The HTTP layer streams the file back as a
/// download; `DirectorySink` keeps a copy on disk.
pub trait ExportSink: Send + Sync {
    fn save(&self, file: &ExportedFile) -> Result<PathBuf, ExportError>;
}

/// Writes exported files into a fixed directory, overwriting same-named files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&self, file: &ExportedFile) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        // Only the final component is used, so a name can never leave `dir`.
        let name = Path::new(&file.filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{DEFAULT_FILENAME}.{PDF_EXTENSION}")));
        let path = self.dir.join(name);
        fs::write(&path, &file.bytes)?;
        info!(path = %path.display(), bytes = file.bytes.len(), "Saved exported document");
        Ok(path)
    }
}

/// Encodes `doc` and names it `<filename>.pdf`; a blank name becomes `resume.pdf`.
pub fn export_document(doc: &Document, filename: &str) -> Result<ExportedFile, ExportError> {
    let stem = file_stem(filename);
    let bytes = encode_pdf(doc)?;
    debug!(
        filename = stem,
        pages = doc.page_count(),
        bytes = bytes.len(),
        "Encoded PDF"
    );
    Ok(ExportedFile {
        filename: format!("{stem}.{PDF_EXTENSION}"),
        mime_type: PDF_MIME,
        bytes,
        page_count: doc.page_count(),
    })
}

/// Last path segment of `filename` with leading dots removed.
/// Separators of either platform count, so `../x` and `/abs/x` both give `x`.
fn file_stem(filename: &str) -> &str {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.')
        .trim();
    match last {
        "" => DEFAULT_FILENAME,
        name => name,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF encoding
// ────────────────────────────────────────────────────────────────────────────

pub fn encode_pdf(doc: &Document) -> Result<Vec<u8>, ExportError> {
    let geometry = doc.geometry;
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.page_count());
    for page in doc.pages() {
        let content = Content {
            operations: page_operations(page, &geometry),
        };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
        }
        .into(),
    );

    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(&doc.title), StringFormat::Literal),
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)?;
    Ok(bytes)
}

fn color_operands(color: Rgb) -> Vec<Object> {
    color.to_unit().into_iter().map(Object::from).collect()
}

/// Converts a top-down rectangle to PDF `re` operands (bottom-left origin).
fn rect_operands(rect: &Rect, geometry: &PageGeometry) -> Vec<Object> {
    vec![
        rect.x.into(),
        (geometry.height - rect.y - rect.height).into(),
        rect.width.into(),
        rect.height.into(),
    ]
}

fn page_operations(page: &Page, geometry: &PageGeometry) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match &op.shape {
            Shape::Text(run) => push_text(&mut ops, run, geometry),
            Shape::FillRect { rect, color } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new("re", rect_operands(rect, geometry)));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Shape::StrokeRect { rect, rule } => {
                push_stroke_setup(&mut ops, rule);
                ops.push(Operation::new("re", rect_operands(rect, geometry)));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Shape::Line { x1, y1, x2, y2, rule } => {
                push_stroke_setup(&mut ops, rule);
                ops.push(Operation::new(
                    "m",
                    vec![(*x1).into(), (geometry.height - y1).into()],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![(*x2).into(), (geometry.height - y2).into()],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn push_stroke_setup(ops: &mut Vec<Operation>, rule: &RuleStyle) {
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("RG", color_operands(rule.color)));
    ops.push(Operation::new("w", vec![rule.width.into()]));
}

fn push_text(ops: &mut Vec<Operation>, run: &TextRun, geometry: &PageGeometry) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![run.style.face.resource_name().into(), run.style.size.into()],
    ));
    ops.push(Operation::new("rg", color_operands(run.style.color)));
    ops.push(Operation::new(
        "Td",
        vec![run.x.into(), (geometry.height - run.baseline).into()],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(to_win_ansi(&run.text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Encodes text for a WinAnsiEncoding simple font.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceEntry, PersonalInfo, ResumeData};
    use crate::render::composer::compose;

    fn sample(entries: usize) -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                ..Default::default()
            },
            summary: Some("Engineer (backend) who ships.".to_string()),
            experience: (0..entries)
                .map(|i| ExperienceEntry {
                    position: format!("Engineer {i}"),
                    company: "Acme".to_string(),
                    start_date: "2020".to_string(),
                    end_date: "Present".to_string(),
                    description: Some("Built things and ran them in production. ".repeat(3)),
                })
                .collect(),
            education: vec![],
            skills: vec!["Go".to_string(), "SQL".to_string()],
        }
    }

    #[test]
    fn test_export_names_file_with_extension() {
        let doc = compose(&sample(1), "modern");
        let file = export_document(&doc, "jane-cv").unwrap();
        assert_eq!(file.filename, "jane-cv.pdf");
        assert_eq!(file.mime_type, PDF_MIME);
        assert!(file.bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_blank_filename_falls_back_to_default() {
        let doc = compose(&sample(0), "modern");
        let file = export_document(&doc, "   ").unwrap();
        assert_eq!(file.filename, "resume.pdf");
    }

    #[test]
    fn test_exported_pdf_round_trips_page_count_and_text() {
        let doc = compose(&sample(30), "bold");
        assert!(doc.page_count() > 1);
        let file = export_document(&doc, "long").unwrap();

        let parsed = lopdf::Document::load_mem(&file.bytes).unwrap();
        let pages = parsed.get_pages();
        assert_eq!(pages.len(), doc.page_count());
        assert_eq!(file.page_count, doc.page_count());

        let first_page_id = *pages.get(&1).unwrap();
        let content = parsed.get_page_content(first_page_id).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.contains("Jane Doe"));
        assert!(content.contains("/F2"));
    }

    #[test]
    fn test_win_ansi_maps_typographic_characters() {
        assert_eq!(to_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(to_win_ansi("• é"), vec![0x95, b' ', 0xe9]);
        assert_eq!(to_win_ansi("✓"), vec![b'?']);
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"));
        let file = export_document(&compose(&sample(1), "minimal"), "cv").unwrap();

        let path = sink.save(&file).unwrap();
        assert_eq!(path, dir.path().join("exports").join("cv.pdf"));
        assert_eq!(std::fs::read(path).unwrap(), file.bytes);
    }

    #[test]
    fn test_filename_keeps_only_last_path_segment() {
        let doc = compose(&sample(0), "minimal");
        for (title, expected) in [
            ("../x", "x.pdf"),
            ("/abs/x", "x.pdf"),
            ("..\\..\\win", "win.pdf"),
            ("..", "resume.pdf"),
            ("dir/", "resume.pdf"),
            (".hidden", "hidden.pdf"),
        ] {
            assert_eq!(export_document(&doc, title).unwrap().filename, expected, "{title}");
        }
    }

    #[test]
    fn test_directory_sink_stays_inside_its_directory() {
        let root = tempfile::tempdir().unwrap();
        let exports = root.path().join("exports");
        let sink = DirectorySink::new(&exports);
        let doc = compose(&sample(0), "modern");

        for title in ["../escaped", "/abs/escaped"] {
            let path = sink.save(&export_document(&doc, title).unwrap()).unwrap();
            assert_eq!(path, exports.join("escaped.pdf"));
        }
        assert!(!root.path().join("escaped.pdf").exists());

        // A hand-built file name with separators is also confined.
        let mut file = export_document(&doc, "cv").unwrap();
        file.filename = "../outside.pdf".to_string();
        assert_eq!(sink.save(&file).unwrap(), exports.join("outside.pdf"));
        assert!(!root.path().join("outside.pdf").exists());
    }

    #[test]
    fn test_directory_sink_surfaces_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"x").unwrap();
        let sink = DirectorySink::new(&blocker);
        let file = export_document(&compose(&sample(0), "minimal"), "cv").unwrap();
        assert!(matches!(sink.save(&file), Err(ExportError::Io(_))));
    }
}
