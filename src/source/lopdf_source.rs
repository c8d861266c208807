//! Positioned text extraction using lopdf.
//!
//! Walks each page's content stream, tracking the text matrix and current
//! font, and emits one [`RawFragment`] per shown string. Coordinates are
//! converted from PDF user space (origin bottom-left) to top-down page
//! coordinates so that sorting by `y` follows reading order.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use super::options::{ErrorMode, SourceOptions};
use super::{BBox, DocumentInfo, PageTextSource, RawFragment, RawPage, SourceDocument};
use crate::detect::{pdf_version_from_bytes, sniff_pdf_version};
use crate::error::{Error, Result};
use crate::layout::is_spaceless_script_char;

/// US Letter, used when a page carries no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Guard against cyclic `Parent` chains in malformed page trees.
const MAX_PARENT_DEPTH: usize = 32;

/// TJ adjustments (in 1/1000 text space units) wider than this read as word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Text source backed by lopdf.
#[derive(Debug, Clone, Default)]
pub struct LopdfSource {
    options: SourceOptions,
}

impl LopdfSource {
    /// Create a source with default (strict) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with custom options.
    pub fn with_options(options: SourceOptions) -> Self {
        Self { options }
    }

    /// Extract a document held in memory.
    pub fn load_bytes(&self, data: &[u8]) -> Result<SourceDocument> {
        pdf_version_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        self.read_document(&doc)
    }

    fn read_document(&self, doc: &LopdfDocument) -> Result<SourceDocument> {
        let page_ids = doc.get_pages();
        let info = DocumentInfo {
            page_count: page_ids.len() as u32,
            creator: info_string(doc, b"Creator"),
            producer: info_string(doc, b"Producer"),
        };

        let mut pages = Vec::with_capacity(page_ids.len());
        for (&number, &page_id) in &page_ids {
            match read_page(doc, number, page_id) {
                Ok(page) => pages.push(page),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping page {}: {}", number, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(SourceDocument { info, pages })
    }
}

impl PageTextSource for LopdfSource {
    fn load(&self, path: &Path) -> Result<SourceDocument> {
        sniff_pdf_version(path)?;
        // The lopdf document lives only for this call.
        let doc = LopdfDocument::load(path)?;
        self.read_document(&doc)
    }
}

fn read_page(doc: &LopdfDocument, number: u32, page_id: ObjectId) -> Result<RawPage> {
    let [mx0, my0, mx1, my1] = media_box(doc, page_id);
    let mut page = RawPage::new(number, (mx1 - mx0).abs(), (my1 - my0).abs());

    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;
    let content = page_content(doc, page_id)?;

    let mut walker = ContentWalker::new(doc, &fonts);
    for shown in walker.walk(&content)? {
        let glyphs = shown.text.chars().count() as f32;
        let x0 = shown.x - mx0;
        let baseline = page.height - (shown.y - my0);
        let bbox = BBox::new(
            x0,
            baseline - shown.size * 0.8,
            x0 + glyphs * shown.size * 0.5,
            baseline + shown.size * 0.2,
        );
        let (bold, italic) = style_from_font_name(&shown.font);
        page.push(RawFragment {
            text: shown.text,
            size: shown.size,
            font: shown.font,
            bold,
            italic,
            bbox,
        });
    }

    Ok(page)
}

/// Infer weight and slant from a base font name.
fn style_from_font_name(name: &str) -> (bool, bool) {
    let lower = name.to_lowercase();
    let bold = lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
    let italic = lower.contains("italic") || lower.contains("oblique");
    (bold, italic)
}

fn media_box(doc: &LopdfDocument, page_id: ObjectId) -> [f32; 4] {
    let mut current = doc.get_dictionary(page_id).ok();
    let mut depth = 0;

    while let Some(dict) = current {
        if let Some(rect) = dict
            .get(b"MediaBox")
            .ok()
            .and_then(|obj| resolve(doc, obj))
            .and_then(as_rect)
        {
            return rect;
        }

        depth += 1;
        if depth > MAX_PARENT_DEPTH {
            break;
        }
        current = dict
            .get(b"Parent")
            .ok()
            .and_then(|p| p.as_reference().ok())
            .and_then(|id| doc.get_dictionary(id).ok());
    }

    DEFAULT_MEDIA_BOX
}

fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn as_rect(obj: &Object) -> Option<[f32; 4]> {
    let values: Vec<f32> = obj.as_array().ok()?.iter().filter_map(get_number).collect();
    match values.as_slice() {
        [a, b, c, d] => Some([*a, *b, *c, *d]),
        _ => None,
    }
}

/// Concatenate a page's (possibly split) content streams.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        // A page without content is blank, not broken.
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Stream(s)) => stream_bytes(s),
            Ok(Object::Array(arr)) => Ok(concat_streams(doc, arr)),
            _ => Err(Error::TextExtract("Invalid content stream".to_string())),
        },
        Object::Array(arr) => Ok(concat_streams(doc, arr)),
        _ => Err(Error::TextExtract("Invalid content stream".to_string())),
    }
}

fn concat_streams(doc: &LopdfDocument, refs: &[Object]) -> Vec<u8> {
    let mut content = Vec::new();
    for obj in refs {
        if let Object::Reference(r) = obj {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                if let Ok(data) = stream_bytes(s) {
                    content.extend_from_slice(&data);
                    content.push(b' ');
                }
            }
        }
    }
    content
}

/// Stream data, decoded when a filter is declared.
fn stream_bytes(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        stream
            .decompressed_content()
            .map_err(|e| Error::TextExtract(e.to_string()))
    } else {
        Ok(stream.content.clone())
    }
}

/// A string painted by a text-showing operator, in PDF user space.
struct ShownText {
    text: String,
    x: f32,
    y: f32,
    size: f32,
    font: String,
}

struct ContentWalker<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    matrix: TextMatrix,
    in_text: bool,
}

impl<'a> ContentWalker<'a> {
    fn new(doc: &'a LopdfDocument, fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            matrix: TextMatrix::default(),
            in_text: false,
        }
    }

    fn walk(&mut self, content: &[u8]) -> Result<Vec<ShownText>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        let mut shown = Vec::new();
        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    self.in_text = true;
                    self.matrix.reset();
                }
                "ET" => self.in_text = false,
                "Tf" if operands.len() >= 2 => {
                    if let Object::Name(key) = &operands[0] {
                        self.font_key = key.clone();
                        self.font_name = self.base_font(key);
                    }
                    self.font_size = get_number(&operands[1]).unwrap_or(12.0);
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        self.matrix.leading = leading;
                    }
                }
                "Td" if operands.len() >= 2 => {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    self.matrix.translate(tx, ty);
                }
                "TD" if operands.len() >= 2 => {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    self.matrix.leading = -ty;
                    self.matrix.translate(tx, ty);
                }
                "Tm" if operands.len() >= 6 => {
                    let n: Vec<f32> = operands.iter().take(6).map(|o| get_number(o).unwrap_or(0.0)).collect();
                    self.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
                "T*" => self.matrix.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let text = self.decode(bytes);
                        self.emit(text, &mut shown);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let text = self.decode_array(items);
                        self.emit(text, &mut shown);
                    }
                }
                "'" | "\"" => {
                    self.matrix.next_line();
                    let idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = operands.get(idx) {
                        let text = self.decode(bytes);
                        self.emit(text, &mut shown);
                    }
                }
                _ => {}
            }
        }

        Ok(shown)
    }

    fn emit(&self, text: String, out: &mut Vec<ShownText>) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let (x, y) = self.matrix.position();
        out.push(ShownText {
            text,
            x,
            y,
            size: self.font_size * self.matrix.scale(),
            font: self.font_name.clone(),
        });
    }

    fn base_font(&self, key: &[u8]) -> String {
        self.fonts
            .get(key)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string())
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());
        match encoding {
            Some(ref enc) => decoded_or_simple(LopdfDocument::decode_text(enc, bytes), bytes),
            None => decode_text_simple(bytes),
        }
    }

    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                Object::Integer(_) | Object::Real(_) => {
                    // Large negative adjustments move the pen right: a word gap.
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    let ends_spaceless = combined
                        .chars()
                        .last()
                        .map_or(true, |c| c.is_whitespace() || is_spaceless_script_char(c));
                    if adjustment > TJ_SPACE_THRESHOLD && !ends_spaceless {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }
}

/// Text matrix state for one BT/ET block.
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn reset(&mut self) {
        let leading = self.leading;
        *self = Self {
            leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Keep an encoding-aware decode, or fall back to the raw bytes when it fails.
fn decoded_or_simple<E>(decoded: std::result::Result<String, E>, bytes: &[u8]) -> String {
    decoded.unwrap_or_else(|_| decode_text_simple(bytes))
}

/// Decode strings from fonts without a usable encoding: UTF-16BE with BOM,
/// then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Read a string entry from the trailer's Info dictionary.
fn info_string(doc: &LopdfDocument, key: &[u8]) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let dict = match info {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    let value = match dict.get(key).ok()? {
        Object::String(bytes, _) => decode_text_simple(bytes),
        Object::Name(bytes) => String::from_utf8_lossy(bytes).to_string(),
        _ => return None,
    };
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}
