//! PDF assembly: one page per rendered card.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbaImage;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use crate::error::CardError;
use crate::page::PageGeometry;

const IMAGE_NAME: &[u8] = b"Card";

/// Build a PDF with one page per image. Each image covers the full media
/// box of `page`, so it should be a raster of the whole page.
pub fn write_pdf(pages: &[RgbaImage], page: &PageGeometry) -> Result<Vec<u8>, CardError> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_refs: Vec<(Ref, Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc(), alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_refs.iter().map(|(page_id, _, _)| *page_id))
        .count(pages.len() as i32);

    for (image, &(page_id, content_id, image_id)) in pages.iter().zip(&page_refs) {
        let rgb: Vec<u8> = image
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let compressed = deflate(&rgb)?;
        {
            let mut xobj = pdf.image_xobject(image_id, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(image.width() as i32);
            xobj.height(image.height() as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }

        // PDF space is bottom-up; stretch the unit image square over the page.
        let mut content = Content::new();
        content.save_state();
        content.transform([page.width, 0.0, 0.0, page.height, 0.0, 0.0]);
        content.x_object(Name(IMAGE_NAME));
        content.restore_state();
        let stream = deflate(&content.finish())?;
        pdf.stream(content_id, &stream).filter(Filter::FlateDecode);

        let mut pdf_page = pdf.page(page_id);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_id);
        pdf_page
            .resources()
            .x_objects()
            .pair(Name(IMAGE_NAME), image_id);
    }

    Ok(pdf.finish())
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, CardError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|err| CardError::Encode(err.to_string()))?;
    encoder
        .finish()
        .map_err(|err| CardError::Encode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn one_page_per_image_with_letter_media_box() {
        let page = PageGeometry::letter();
        let image = RgbaImage::from_pixel(61, 79, Rgba([255, 255, 255, 255]));
        let bytes = write_pdf(&[image.clone(), image.clone(), image], &page).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b"/MediaBox [0 0 612 792]"), 3);
        assert_eq!(count(&bytes, b"/Count 3"), 1);
    }

    #[test]
    fn identical_pages_give_identical_bytes() {
        let page = PageGeometry::letter();
        let image = RgbaImage::from_pixel(10, 10, Rgba([10, 20, 30, 255]));
        let a = write_pdf(std::slice::from_ref(&image), &page).unwrap();
        let b = write_pdf(&[image], &page).unwrap();
        assert_eq!(a, b);
    }
}
