//! Text spans as reported by a document decoder.

/// Bounding box of a span in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

bitflags::bitflags! {
    /// Style bits attached to a span.
    ///
    /// Bit positions follow the decoder contract: italic is bit 1, bold is bit 4.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u32 {
        /// Italic or oblique face
        const ITALIC = 1 << 1;
        /// Bold, black or heavy face
        const BOLD = 1 << 4;
    }
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl StyleFlags {
    /// Guess style bits from a font's base name (e.g. "Helvetica-BoldOblique").
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut flags = Self::empty();
        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            flags |= Self::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            flags |= Self::ITALIC;
        }
        flags
    }

    /// Whether the bold bit is set.
    pub fn is_bold(&self) -> bool {
        self.contains(Self::BOLD)
    }

    /// Whether the italic bit is set.
    pub fn is_italic(&self) -> bool {
        self.contains(Self::ITALIC)
    }

    /// Bold or italic.
    pub fn is_emphasized(&self) -> bool {
        self.intersects(Self::BOLD | Self::ITALIC)
    }
}

/// A run of text sharing one font size and style, as produced by a decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Font size in points
    pub size: f32,
    /// The text content
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Style bits
    pub flags: StyleFlags,
    /// Position on the page
    pub bbox: BBox,
}

impl TextSpan {
    /// Create a plain span.
    pub fn new(text: impl Into<String>, size: f32, page: u32) -> Self {
        Self {
            size,
            text: text.into(),
            page,
            flags: StyleFlags::empty(),
            bbox: BBox::default(),
        }
    }

    /// Set style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the span bold.
    pub fn bold(mut self) -> Self {
        self.flags |= StyleFlags::BOLD;
        self
    }

    /// Mark the span italic.
    pub fn italic(mut self) -> Self {
        self.flags |= StyleFlags::ITALIC;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }
}
