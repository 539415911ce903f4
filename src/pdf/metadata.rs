//! Reading back a generated tag sheet

use std::path::Path;
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

/// Follow a reference, or take the object as is
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

fn trailer_dict<'a>(doc: &'a Document, key: &[u8]) -> Option<&'a Dictionary> {
    let object = doc.trailer.get(key).ok()?;
    resolve(doc, object).ok()?.as_dict().ok()
}

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = trailer_dict(doc, b"Root")
        .ok_or_else(|| Error::General("No catalog in trailer".to_string()))?;

    let pages = catalog
        .get(b"Pages")
        .map_err(|_| Error::General("No Pages in catalog".to_string()))?;
    let pages = resolve(doc, pages)?
        .as_dict()
        .map_err(|_| Error::General("Pages is not a dictionary".to_string()))?;

    match pages.get(b"Count") {
        Ok(Object::Integer(n)) if *n >= 0 => Ok(*n as usize),
        _ => Err(Error::General("Pages has no valid Count".to_string())),
    }
}

/// Text entry of the Info dictionary
fn info_text(info: Option<&Dictionary>, key: &[u8]) -> Option<String> {
    let bytes = info?.get(key).ok()?.as_str().ok()?;
    String::from_utf8(bytes.to_vec()).ok()
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Program that wrote the document (if present)
    pub producer: Option<String>,
    /// Raw PDF creation date (if present)
    pub creation_date: Option<String>,
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    let info = trailer_dict(&doc, b"Info");
    Ok(PdfMetadata {
        page_count,
        title: info_text(info, b"Title"),
        producer: info_text(info, b"Producer"),
        creation_date: info_text(info, b"CreationDate"),
    })
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    extract_metadata(path).map(|metadata| metadata.page_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SheetGeometry;
    use crate::pdf::sheet::{DocumentInfo, SheetWriter};
    use tempfile::TempDir;

    #[test]
    fn test_count_pages_nonexistent_file() {
        let result = count_pages(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_extract_metadata_reads_info() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheet.pdf");

        let geometry = SheetGeometry::default();
        let mut writer = SheetWriter::new(&geometry);
        writer.start_page().unwrap();
        writer.draw_guides(&geometry.guide_lines());
        writer.start_page().unwrap();
        let info = DocumentInfo {
            title: "Autumn meetup".to_string(),
            producer: "tests".to_string(),
        };
        writer.save(&path, &info).unwrap();

        let metadata = extract_metadata(&path).unwrap();
        assert_eq!(metadata.page_count, 2);
        assert_eq!(metadata.title.as_deref(), Some("Autumn meetup"));
        assert_eq!(metadata.producer.as_deref(), Some("tests"));
        assert!(metadata.creation_date.unwrap().starts_with("D:"));
        assert_eq!(count_pages(&path).unwrap(), 2);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert!(extract_metadata(&path).is_err());
    }
}
