//! In-memory PDF canvas over `lopdf`.
//!
//! Drawing calls append content-stream operations to per-page buffers; the
//! `lopdf` object graph is only built in [`PdfCanvas::finish`]. Keeping pages
//! as plain operation lists lets the footer pass revisit every page once the
//! final page count is known.

use image::{GenericImageView, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use hmsnova_core::types::Rgb;

use crate::error::ReportResult;
use crate::metrics::{encode_win_ansi, Font};

/// Handle to an image registered with [`PdfCanvas::embed_png`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(usize);

impl ImageHandle {
    fn resource_name(self) -> String {
        format!("Im{}", self.0)
    }
}

struct EmbeddedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// PDF date string, e.g. `D:20261016000000Z`.
    pub creation_date: Option<String>,
}

/// A paginated drawing surface.
pub struct PdfCanvas {
    width: f32,
    height: f32,
    pages: Vec<Vec<Operation>>,
    images: Vec<EmbeddedImage>,
}

impl PdfCanvas {
    /// Create a canvas with a single empty page of the given size in points.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pages: vec![Vec::new()],
            images: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append an empty page and return its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Vec::new());
        self.pages.len() - 1
    }

    fn ops(&mut self, page: usize) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[page.min(last)]
    }

    /// Draw a single line of text with its baseline at `(x, y)`.
    pub fn draw_text(&mut self, page: usize, x: f32, y: f32, text: &str, font: Font, size: f32, color: Rgb) {
        let encoded = encode_win_ansi(text);
        let ops = self.ops(page);
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "rg",
            vec![color.r.into(), color.g.into(), color.b.into()],
        ));
        ops.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), size.into()],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Stroke a straight line.
    pub fn draw_line(&mut self, page: usize, from: (f32, f32), to: (f32, f32), thickness: f32, color: Rgb) {
        let ops = self.ops(page);
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "RG",
            vec![color.r.into(), color.g.into(), color.b.into()],
        ));
        ops.push(Operation::new("w", vec![thickness.into()]));
        ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
        ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Decode PNG bytes and register them as an image XObject.
    ///
    /// Transparency is preserved through a soft mask.
    pub fn embed_png(&mut self, png: &[u8]) -> ReportResult<ImageHandle> {
        let decoded = image::load_from_memory_with_format(png, ImageFormat::Png)?;
        let (width, height) = decoded.dimensions();
        let has_alpha = decoded.color().has_alpha();
        let rgba = decoded.to_rgba8();

        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for pixel in rgba.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }

        self.images.push(EmbeddedImage {
            width,
            height,
            rgb,
            alpha: has_alpha.then_some(alpha),
        });
        Ok(ImageHandle(self.images.len() - 1))
    }

    /// Place an embedded image with its lower-left corner at `(x, y)`.
    pub fn draw_image(&mut self, page: usize, image: ImageHandle, x: f32, y: f32, width: f32, height: f32) {
        let name = image.resource_name();
        let ops = self.ops(page);
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.0_f32.into(),
                0.0_f32.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Assemble the PDF object graph and serialize it.
    pub fn finish(self, info: &DocumentInfo) -> ReportResult<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }

        let mut xobjects = Dictionary::new();
        for (idx, image) in self.images.into_iter().enumerate() {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width),
                "Height" => i64::from(image.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            };
            if let Some(alpha) = image.alpha {
                let mask_id = doc.add_object(Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => i64::from(image.width),
                        "Height" => i64::from(image.height),
                        "ColorSpace" => "DeviceGray",
                        "BitsPerComponent" => 8_i64,
                    },
                    alpha,
                ));
                dict.set("SMask", mask_id);
            }
            let image_id = doc.add_object(Stream::new(dict, image.rgb));
            xobjects.set(ImageHandle(idx).resource_name(), image_id);
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let media_box: Vec<Object> = vec![
            0.0_f32.into(),
            0.0_f32.into(),
            self.width.into(),
            self.height.into(),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info_dict = dictionary! {
            "Title" => Object::String(encode_win_ansi(&info.title), StringFormat::Literal),
            "Producer" => Object::string_literal(info.producer.as_str()),
        };
        if let Some(date) = &info.creation_date {
            info_dict.set("CreationDate", Object::string_literal(date.as_str()));
        }
        let info_id = doc.add_object(info_dict);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
