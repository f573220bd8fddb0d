//! Document text extraction
//!
//! Converts an uploaded file into plain text using format-specific parsers.
//! The format is chosen by file extension alone; unrecognized extensions
//! yield an empty string so downstream chunking simply sees nothing. Parse
//! failures are not recovered here; they surface as [`AppError::Parse`].

use std::io::Read;
use std::path::Path;

use calamine::Reader as _;
use tracing::debug;

use crate::chunk::SLIDE_SEPARATOR;
use crate::types::{AppError, AppResult};

/// Supported document formats, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
    Csv,
    Unsupported,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            "pptx" => DocumentKind::Pptx,
            "xlsx" => DocumentKind::Xlsx,
            "csv" => DocumentKind::Csv,
            _ => DocumentKind::Unsupported,
        }
    }

    /// Presentation text carries slide boundary markers and gets the
    /// slide-aware chunking pass.
    pub fn has_slide_boundaries(self) -> bool {
        self == DocumentKind::Pptx
    }
}

/// Extract plain text from the file at `path`.
///
/// Unsupported extensions return an empty string rather than an error.
pub async fn extract_text(path: &Path) -> AppResult<String> {
    let kind = DocumentKind::from_path(path);
    if kind == DocumentKind::Unsupported {
        debug!(path = %path.display(), "unsupported extension, skipping extraction");
        return Ok(String::new());
    }

    let data = tokio::fs::read(path).await?;
    debug!(path = %path.display(), kind = ?kind, bytes = data.len(), "extracting text");

    match kind {
        DocumentKind::Pdf => extract_pdf(&data),
        DocumentKind::Docx => extract_docx(&data),
        DocumentKind::Pptx => extract_pptx(&data),
        DocumentKind::Xlsx => extract_xlsx(&data),
        DocumentKind::Csv => extract_csv(&data),
        DocumentKind::Unsupported => unreachable!(),
    }
}

fn extract_pdf(data: &[u8]) -> AppResult<String> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| AppError::Parse(e.to_string()))
}

/// Raw text of every run in every paragraph, paragraphs joined by newlines.
fn extract_docx(data: &[u8]) -> AppResult<String> {
    let doc = docx_rs::read_docx(data).map_err(|e| AppError::Parse(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut line = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Per-slide text, slides separated by the slide boundary marker.
fn extract_pptx(data: &[u8]) -> AppResult<String> {
    let cursor = std::io::Cursor::new(data);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| AppError::Parse(e.to_string()))?;

    // Slide parts are ppt/slides/slide1.xml, slide2.xml, and so on; sort
    // numerically so slide10 follows slide9, not slide1.
    let mut slide_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(|s| s.to_string())
        .collect();
    slide_names.sort_by_key(|name| {
        name.trim_start_matches("ppt/slides/slide")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(0)
    });

    let mut slides = Vec::new();
    for slide_name in slide_names {
        let mut file = archive
            .by_name(&slide_name)
            .map_err(|e| AppError::Parse(e.to_string()))?;
        let mut xml = String::new();
        file.read_to_string(&mut xml)
            .map_err(|e| AppError::Parse(e.to_string()))?;

        let slide_text = slide_text_from_xml(&xml);
        if !slide_text.is_empty() {
            slides.push(slide_text);
        }
    }

    Ok(slides.join(SLIDE_SEPARATOR))
}

/// Pull the `<a:t>` runs out of a slide's XML, one line per paragraph.
///
/// Paragraphs inside a slide join with single newlines only, so the double
/// line break stays reserved for slide boundaries.
fn slide_text_from_xml(xml: &str) -> String {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut lines: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_element = true;
                }
            }
            Ok(Event::Text(e)) => {
                if in_text_element {
                    if let Ok(text) = e.unescape() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_element = false,
                b"p" => {
                    let line = paragraph.trim();
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                    paragraph.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    // A trailing run outside any closed paragraph still counts.
    let line = paragraph.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }

    lines.join("\n")
}

/// Every sheet's rows in order, cells joined by spaces, rows joined by newlines.
fn extract_xlsx(data: &[u8]) -> AppResult<String> {
    let cursor = std::io::Cursor::new(data);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::Parse(e.to_string()))?;

    let mut rows = Vec::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| AppError::Parse(e.to_string()))?;
        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    calamine::Data::Empty => String::new(),
                    calamine::Data::String(s) => s.clone(),
                    calamine::Data::Float(f) => f.to_string(),
                    calamine::Data::Int(i) => i.to_string(),
                    calamine::Data::Bool(b) => b.to_string(),
                    calamine::Data::DateTime(dt) => dt.to_string(),
                    other => other.to_string(),
                })
                .collect();
            rows.push(cells.join(" "));
        }
    }

    Ok(rows.join("\n"))
}

/// Rows with fields joined by spaces, rows joined by newlines. The header
/// row is treated like any other row.
fn extract_csv(data: &[u8]) -> AppResult<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::Parse(e.to_string()))?;
        rows.push(record.iter().collect::<Vec<_>>().join(" "));
    }

    Ok(rows.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn kind_from_extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_path(Path::new("a.pdf")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("a.PDF")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("b.Docx")), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_path(Path::new("c.pptx")), DocumentKind::Pptx);
        assert_eq!(DocumentKind::from_path(Path::new("d.xlsx")), DocumentKind::Xlsx);
        assert_eq!(DocumentKind::from_path(Path::new("e.csv")), DocumentKind::Csv);
        assert_eq!(
            DocumentKind::from_path(Path::new("f.txt")),
            DocumentKind::Unsupported
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("noextension")),
            DocumentKind::Unsupported
        );
    }

    #[test]
    fn only_pptx_uses_slide_boundaries() {
        assert!(DocumentKind::Pptx.has_slide_boundaries());
        assert!(!DocumentKind::Pdf.has_slide_boundaries());
        assert!(!DocumentKind::Csv.has_slide_boundaries());
    }

    #[test]
    fn csv_fields_join_with_spaces_rows_with_newlines() {
        let data = b"name,age\nalice,30\nbob,41\n";
        let text = extract_csv(data).unwrap();
        assert_eq!(text, "name age\nalice 30\nbob 41");
    }

    #[test]
    fn csv_quoted_fields_survive() {
        let data = b"\"hello, world\",x\n";
        let text = extract_csv(data).unwrap();
        assert_eq!(text, "hello, world x");
    }

    fn pptx_fixture(slides: &[&str]) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = zip::write::SimpleFileOptions::default();
            for (i, body) in slides.iter().enumerate() {
                writer
                    .start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
                    .unwrap();
                writer.write_all(body.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn pptx_slides_separated_by_double_line_break() {
        let slide = |runs: &[&str]| {
            let paragraphs: String = runs
                .iter()
                .map(|r| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", r))
                .collect();
            format!(
                "<p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">{}</p:sld>",
                paragraphs
            )
        };
        let data = pptx_fixture(&[
            &slide(&["Title slide", "subtitle"]),
            &slide(&["Second slide"]),
        ]);

        let text = extract_pptx(&data).unwrap();
        assert_eq!(text, "Title slide\nsubtitle\n\nSecond slide");
    }

    #[test]
    fn pptx_slides_sort_numerically() {
        // slide10 must come after slide2 even though it sorts first lexically.
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = zip::write::SimpleFileOptions::default();
            for (name, body) in [
                ("ppt/slides/slide10.xml", "ten"),
                ("ppt/slides/slide2.xml", "two"),
                ("ppt/slides/slide1.xml", "one"),
            ] {
                writer.start_file(name, options).unwrap();
                writer
                    .write_all(
                        format!("<p:sld><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:sld>", body)
                            .as_bytes(),
                    )
                    .unwrap();
            }
            writer.finish().unwrap();
        }

        let text = extract_pptx(&cursor.into_inner()).unwrap();
        assert_eq!(text, "one\n\ntwo\n\nten");
    }

    #[test]
    fn docx_paragraphs_join_with_newlines() {
        use docx_rs::{Docx, Paragraph, Run};

        let mut cursor = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First paragraph")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Second "))
                    .add_run(Run::new().add_text("paragraph")),
            )
            .build()
            .pack(&mut cursor)
            .unwrap();

        let text = extract_docx(&cursor.into_inner()).unwrap();
        assert_eq!(text, "First paragraph\nSecond paragraph");
    }

    #[tokio::test]
    async fn xlsx_cells_join_with_spaces_rows_with_newlines() {
        let path = Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/inventory.xlsx"
        ));

        let text = extract_text(path).await.unwrap();
        assert_eq!(text, "item count\nwidget 4\ngadget 17");
    }

    #[tokio::test]
    async fn unsupported_extension_extracts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("notes.txt");
        std::fs::write(&path, "plenty of text in here").unwrap();

        let text = extract_text(&path).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn csv_extraction_via_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "a,b\nc,d\n").unwrap();

        let text = extract_text(&path).await.unwrap();
        assert_eq!(text, "a b\nc d");
    }

    #[tokio::test]
    async fn corrupt_pdf_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        assert!(matches!(
            extract_text(&path).await,
            Err(AppError::Parse(_))
        ));
    }
}
