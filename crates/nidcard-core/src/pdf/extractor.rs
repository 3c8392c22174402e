//! PDF text and image extraction using lopdf and pdf-extract.

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Document extractor over lopdf (images) and pdf-extract (text layer).
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Everything extracted from a card PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Text layer, concatenated page by page with line boundaries preserved.
    pub text: String,
    /// Embedded images (card photo, signature) across all pages.
    pub images: Vec<ExtractedImage>,
}

/// An image extracted from a PDF.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    /// Encoded image bytes.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoding of `data` ("jpeg" or "png").
    pub format: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }

    fn image_from_object(&self, doc: &Document, obj: &Object) -> Option<ExtractedImage> {
        let Object::Stream(stream) = obj else {
            return None;
        };
        let dict = &stream.dict;

        if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
            return None;
        }

        let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
        let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
        trace!("found image object: {}x{}", width, height);

        let filter = dict.get(b"Filter").ok().and_then(|f| match f {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        });

        match filter {
            Some(b"DCTDecode") => {
                // Already JPEG; pass the stream through untouched.
                return Some(ExtractedImage {
                    data: stream.content.clone(),
                    width,
                    height,
                    format: "jpeg".to_string(),
                });
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                trace!("unsupported image filter, skipping");
                return None;
            }
            _ => {}
        }

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8);

        decode_raw_samples(&data, width, height, color_space, bits)
            .and_then(|img| encode_png(&img).ok())
    }

    /// Resources dictionary for a page, walking up the page tree when the
    /// entry is inherited.
    fn page_resources(&self, doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
        let node = doc.get_object(node_id).ok()?;
        let Object::Dictionary(dict) = node else {
            return None;
        };

        if let Ok(resources) = dict.get(b"Resources") {
            if let Ok((_, Object::Dictionary(res))) = doc.dereference(resources) {
                return Some(res.clone());
            }
        }

        if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
            return self.page_resources(doc, *parent_id);
        }
        None
    }

    /// Scan every object in the document for image streams. Fallback for
    /// PDFs that reference images outside the page resource dictionaries.
    fn scan_all_images(&self, doc: &Document) -> Vec<ExtractedImage> {
        let images: Vec<ExtractedImage> = doc
            .objects
            .values()
            .filter_map(|obj| self.image_from_object(doc, obj))
            .collect();
        debug!("document-wide scan found {} images", images.len());
        images
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes.
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_images(&self, page: u32) -> Result<Vec<ExtractedImage>> {
        let doc = self.document()?;
        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let mut images = Vec::new();
        if let Some(resources) = self.page_resources(doc, *page_id) {
            if let Ok(xobjects) = resources.get(b"XObject") {
                if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
                    for (_name, obj_ref) in xobj_dict.iter() {
                        if let Ok((_, obj)) = doc.dereference(obj_ref) {
                            if let Some(img) = self.image_from_object(doc, obj) {
                                images.push(img);
                            }
                        }
                    }
                }
            }
        }

        debug!("extracted {} images from page {}", images.len(), page);
        Ok(images)
    }

    fn extract_all(&self) -> Result<PdfContent> {
        let doc = self.document()?;

        // A card with a broken text layer still yields its images.
        let text = self.extract_text().unwrap_or_else(|e| {
            warn!("text extraction failed: {e}");
            String::new()
        });

        let mut images = Vec::new();
        for page in 1..=self.page_count() {
            match self.extract_images(page) {
                Ok(page_images) => images.extend(page_images),
                Err(e) => warn!("failed to extract images from page {page}: {e}"),
            }
        }

        if images.is_empty() {
            images = self.scan_all_images(doc);
        }

        debug!(
            "PDF content: {} chars of text, {} images",
            text.len(),
            images.len()
        );
        Ok(PdfContent { text, images })
    }
}

fn decode_raw_samples(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits: i64,
) -> Option<DynamicImage> {
    if bits != 8 {
        trace!("unsupported bits per component: {bits}");
        return None;
    }

    match color_space {
        b"DeviceRGB" | b"RGB" => {
            let expected = (width * height * 3) as usize;
            if data.len() < expected {
                return None;
            }
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data[..expected].to_vec())
                .map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" => {
            let expected = (width * height) as usize;
            if data.len() < expected {
                return None;
            }
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, data[..expected].to_vec())
                .map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "unsupported color space: {}",
                String::from_utf8_lossy(color_space)
            );
            None
        }
    }
}

fn encode_png(img: &DynamicImage) -> Result<ExtractedImage> {
    let mut data = Vec::new();
    img.write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
        .map_err(|e| PdfError::ImageExtraction(e.to_string()))?;
    Ok(ExtractedImage {
        data,
        width: img.width(),
        height: img.height(),
        format: "png".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_extractor_has_no_document() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_all().is_err());
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn decodes_raw_gray_samples() {
        let data = vec![128u8; 4];
        let img = decode_raw_samples(&data, 2, 2, b"DeviceGray", 8).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
    }

    #[test]
    fn rejects_truncated_rgb_samples() {
        let data = vec![0u8; 5]; // 2x2 RGB needs 12 bytes
        assert!(decode_raw_samples(&data, 2, 2, b"DeviceRGB", 8).is_none());
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let data = vec![0u8; 16];
        assert!(decode_raw_samples(&data, 2, 2, b"DeviceGray", 1).is_none());
    }

    #[test]
    fn png_round_trip_preserves_dimensions() {
        let img = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(3, 2, Luma([200u8])));
        let encoded = encode_png(&img).unwrap();
        assert_eq!((encoded.width, encoded.height), (3, 2));
        assert_eq!(encoded.format, "png");
        assert!(!encoded.data.is_empty());
    }
}
