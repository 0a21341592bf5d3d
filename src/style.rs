//! Resolved style values and the decoders turning fixed style strings into them.
//!
//! Decoders never fail: an unparseable string degrades to a documented
//! sentinel so that a chart with a typo in its theme still renders.

use crate::parser::{hex_color, percent_float};
use log::debug;
use nom::{character::complete::i64 as integer, combinator::all_consuming};
use plotters::style::RGBAColor;
use serde::{Serialize, Serializer};
use std::fmt;

// === Colors ===

/// Non-premultiplied 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Returned for color strings that cannot be decoded.
    pub const SENTINEL: Color = Color::rgba(0xaa, 0x66, 0x77, 0x7f);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xff
    }

    /// Replace the alpha channel with `alpha` in `[0, 1]`.
    ///
    /// Any alpha the color already carried is discarded.
    pub fn with_alpha(self, alpha: f64) -> Color {
        Color { a: (alpha * 255.0) as u8, ..self }
    }
}

/// Free-function form of [`Color::with_alpha`].
pub fn set_alpha(color: Color, alpha: f64) -> Color {
    color.with_alpha(alpha)
}

impl fmt::Display for Color {
    /// `#rrggbb`, with the alpha byte appended only when not opaque.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Color> for RGBAColor {
    fn from(c: Color) -> Self {
        RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0)
    }
}

/// Named palette accepted by [`parse_color`].
pub const BUILTIN_COLORS: [(&str, Color); 13] = [
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0xff, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("gray", Color::rgb(0x7f, 0x7f, 0x7f)),
    ("gray20", Color::rgb(0x33, 0x33, 0x33)),
    ("gray40", Color::rgb(0x66, 0x66, 0x66)),
    ("gray60", Color::rgb(0x99, 0x99, 0x99)),
    ("gray80", Color::rgb(0xcc, 0xcc, 0xcc)),
];

/// Decode `#RRGGBB`, `#RRGGBBAA` or a builtin color name.
pub fn parse_color(s: &str) -> Color {
    let s = s.trim();
    if s.starts_with('#') {
        if let Ok((_, color)) = all_consuming(hex_color)(s) {
            return color;
        }
    } else {
        let name = s.to_lowercase();
        if let Some((_, color)) = BUILTIN_COLORS.iter().find(|(n, _)| *n == name) {
            return *color;
        }
    }
    debug!("Cannot parse color {:?}, using sentinel", s);
    Color::SENTINEL
}

// === Floats ===

/// Value returned by [`parse_float`] for unparseable input.
pub const FLOAT_FALLBACK: f64 = 0.5;

/// Decode a float style clamped to `[low, high]`. A trailing `%` divides by 100.
pub fn parse_float(s: &str, low: f64, high: f64) -> f64 {
    match all_consuming(percent_float)(s) {
        Ok((_, value)) if !value.is_nan() => value.clamp(low, high),
        _ => {
            debug!("Cannot parse style {:?} as float, using {}", s, FLOAT_FALLBACK);
            FLOAT_FALLBACK
        }
    }
}

fn parse_code(s: &str) -> Option<i64> {
    all_consuming(integer::<&str, nom::error::Error<&str>>)(s.trim()).ok().map(|(_, n)| n)
}

// === Point shapes ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointShape {
    Blank,
    Circle,
    Square,
    Diamond,
    Delta,
    Nabla,
    SolidCircle,
    SolidSquare,
    SolidDiamond,
    SolidDelta,
    SolidNabla,
    Cross,
    Plus,
    Star,
}

impl PointShape {
    pub const ALL: [PointShape; 14] = [
        PointShape::Blank,
        PointShape::Circle,
        PointShape::Square,
        PointShape::Diamond,
        PointShape::Delta,
        PointShape::Nabla,
        PointShape::SolidCircle,
        PointShape::SolidSquare,
        PointShape::SolidDiamond,
        PointShape::SolidDelta,
        PointShape::SolidNabla,
        PointShape::Cross,
        PointShape::Plus,
        PointShape::Star,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PointShape::Blank => "blank",
            PointShape::Circle => "circle",
            PointShape::Square => "square",
            PointShape::Diamond => "diamond",
            PointShape::Delta => "delta",
            PointShape::Nabla => "nabla",
            PointShape::SolidCircle => "solidcircle",
            PointShape::SolidSquare => "solidsquare",
            PointShape::SolidDiamond => "soliddiamond",
            PointShape::SolidDelta => "soliddelta",
            PointShape::SolidNabla => "solidnabla",
            PointShape::Cross => "cross",
            PointShape::Plus => "plus",
            PointShape::Star => "star",
        }
    }

    /// Any integer is a valid code; it wraps modulo the number of shapes.
    pub fn from_code(code: i64) -> Self {
        Self::ALL[code.rem_euclid(Self::ALL.len() as i64) as usize]
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for PointShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode a shape from its code or name; anything else is blank.
pub fn parse_shape(s: &str) -> PointShape {
    if let Some(code) = parse_code(s) {
        return PointShape::from_code(code);
    }
    let name = s.trim().to_lowercase();
    PointShape::ALL
        .into_iter()
        .find(|shape| shape.name() == name)
        .unwrap_or_else(|| {
            debug!("Unknown point shape {:?}", s);
            PointShape::Blank
        })
}

// === Line types ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Blank,
    Solid,
    Dashed,
    Dotted,
    DotDash,
    LongDash,
    TwoDash,
}

impl LineType {
    pub const ALL: [LineType; 7] = [
        LineType::Blank,
        LineType::Solid,
        LineType::Dashed,
        LineType::Dotted,
        LineType::DotDash,
        LineType::LongDash,
        LineType::TwoDash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LineType::Blank => "blank",
            LineType::Solid => "solid",
            LineType::Dashed => "dashed",
            LineType::Dotted => "dotted",
            LineType::DotDash => "dotdash",
            LineType::LongDash => "longdash",
            LineType::TwoDash => "twodash",
        }
    }

    pub fn from_code(code: i64) -> Self {
        Self::ALL[code.rem_euclid(Self::ALL.len() as i64) as usize]
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode a line type from its code or name; anything else is blank.
pub fn parse_linetype(s: &str) -> LineType {
    if let Some(code) = parse_code(s) {
        return LineType::from_code(code);
    }
    let name = s.trim().to_lowercase();
    LineType::ALL
        .into_iter()
        .find(|lt| lt.name() == name)
        .unwrap_or_else(|| {
            debug!("Unknown line type {:?}", s);
            LineType::Blank
        })
}
