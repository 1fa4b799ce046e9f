//! Writes the presentation package (a zip of OOXML parts)

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::parts;
use super::slide::{picture_slide, picture_slide_rels, SlidePlacement};
use crate::matrix::{MatrixError, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Puts a rendered image into a presentation file
pub trait SlideEmbedder {
    /// Embed the image at `image_path` into a new deck at `deck_path`
    /// (overwriting it) and return the deck path.
    fn embed(&self, image_path: &Path, deck_path: &Path) -> Result<PathBuf>;
}

/// Single-slide PPTX writer
#[derive(Debug, Clone, Default)]
pub struct PptxEmbedder {
    pub placement: SlidePlacement,
    /// Document title stored in the core properties
    pub title: Option<String>,
}

impl PptxEmbedder {
    pub fn new(placement: SlidePlacement) -> Self {
        Self {
            placement,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl SlideEmbedder for PptxEmbedder {
    fn embed(&self, image_path: &Path, deck_path: &Path) -> Result<PathBuf> {
        self.placement.validate()?;

        let image = fs::read(image_path)?;
        if !image.starts_with(&PNG_SIGNATURE) {
            return Err(MatrixError::Validation(format!(
                "{} is not a PNG image",
                image_path.display()
            )));
        }

        let description = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = self.title.as_deref().unwrap_or("Risk Matrix");

        write_package(deck_path, &self.placement, &image, &description, title)?;

        tracing::debug!(
            deck = %deck_path.display(),
            image_bytes = image.len(),
            "wrote presentation"
        );
        Ok(deck_path.to_path_buf())
    }
}

fn write_package(
    deck_path: &Path,
    placement: &SlidePlacement,
    image: &[u8],
    description: &str,
    title: &str,
) -> Result<()> {
    let file = File::create(deck_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    let xml = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    // PNG data is already compressed
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let (slide_cx, slide_cy) = placement.slide_size_emu();
    let text_parts = [
        (parts::CONTENT_TYPES_PATH, parts::content_types()),
        (parts::ROOT_RELS_PATH, parts::root_rels()),
        (parts::CORE_PROPS_PATH, parts::core_props(title)),
        (parts::APP_PROPS_PATH, parts::app_props()),
        (parts::PRESENTATION_PATH, parts::presentation(slide_cx, slide_cy)),
        (parts::PRESENTATION_RELS_PATH, parts::presentation_rels()),
        (parts::MASTER_PATH, parts::slide_master()),
        (parts::MASTER_RELS_PATH, parts::slide_master_rels()),
        (parts::LAYOUT_PATH, parts::slide_layout()),
        (parts::LAYOUT_RELS_PATH, parts::slide_layout_rels()),
        (parts::THEME_PATH, parts::theme()),
        (parts::SLIDE_PATH, picture_slide(placement, description)),
        (parts::SLIDE_RELS_PATH, picture_slide_rels()),
    ];

    for (name, body) in &text_parts {
        zip.start_file(*name, xml)?;
        zip.write_all(body.as_bytes())?;
    }

    zip.start_file(parts::IMAGE_PATH, stored)?;
    zip.write_all(image)?;

    let mut writer = zip.finish()?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn tiny_png(path: &Path) {
        let img = image::RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]));
        img.save(path).unwrap();
    }

    fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Vec<u8> {
        let mut entry = archive.by_name(name).unwrap();
        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_embed_writes_complete_package() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("risk_matrix.png");
        let deck_path = dir.path().join("deck.pptx");
        tiny_png(&image_path);

        let out = PptxEmbedder::default().embed(&image_path, &deck_path).unwrap();
        assert_eq!(out, deck_path);

        let mut archive = zip::ZipArchive::new(File::open(&deck_path).unwrap()).unwrap();
        for name in [
            parts::CONTENT_TYPES_PATH,
            parts::ROOT_RELS_PATH,
            parts::PRESENTATION_PATH,
            parts::SLIDE_PATH,
            parts::SLIDE_RELS_PATH,
            parts::LAYOUT_PATH,
            parts::MASTER_PATH,
            parts::THEME_PATH,
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part {name}");
        }

        let media = read_entry(&mut archive, parts::IMAGE_PATH);
        assert_eq!(media, fs::read(&image_path).unwrap());

        let slide = String::from_utf8(read_entry(&mut archive, parts::SLIDE_PATH)).unwrap();
        assert!(slide.contains(r#"<a:off x="3657600" y="914400"/>"#));
        assert!(slide.contains(r#"<a:ext cx="5486400" cy="4572000"/>"#));
        assert!(slide.contains(r#"descr="risk_matrix.png""#));
        assert_eq!(slide.matches("<p:pic>").count(), 1);
    }

    #[test]
    fn test_embed_overwrites_existing_deck() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("m.png");
        let deck_path = dir.path().join("deck.pptx");
        tiny_png(&image_path);
        fs::write(&deck_path, b"stale").unwrap();

        PptxEmbedder::default().embed(&image_path, &deck_path).unwrap();
        assert!(zip::ZipArchive::new(File::open(&deck_path).unwrap()).is_ok());
    }

    #[test]
    fn test_custom_placement_and_title() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("m.png");
        let deck_path = dir.path().join("deck.pptx");
        tiny_png(&image_path);

        let placement = SlidePlacement {
            left: 0.5,
            top: 0.5,
            width: 9.0,
            height: 6.5,
            ..Default::default()
        };
        PptxEmbedder::new(placement)
            .with_title("Quarterly <risks>")
            .embed(&image_path, &deck_path)
            .unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&deck_path).unwrap()).unwrap();
        let slide = String::from_utf8(read_entry(&mut archive, parts::SLIDE_PATH)).unwrap();
        assert!(slide.contains(r#"<a:off x="457200" y="457200"/>"#));
        let core = String::from_utf8(read_entry(&mut archive, parts::CORE_PROPS_PATH)).unwrap();
        assert!(core.contains("Quarterly &lt;risks&gt;"));
    }

    #[test]
    fn test_missing_image_is_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PptxEmbedder::default()
            .embed(&dir.path().join("absent.png"), &dir.path().join("deck.pptx"));
        assert!(matches!(result, Err(MatrixError::Export(_))));
    }

    #[test]
    fn test_non_png_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("fake.png");
        fs::write(&image_path, b"not a png").unwrap();
        let result = PptxEmbedder::default().embed(&image_path, &dir.path().join("deck.pptx"));
        assert!(matches!(result, Err(MatrixError::Validation(_))));
    }
}
