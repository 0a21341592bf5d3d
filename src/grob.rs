//! Renderer-agnostic primitives: device-space geometry plus resolved style.
//! They carry no behavior and are handed as-is to a rasterizer.

use crate::style::{Color, LineType, PointShape};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrobPoint {
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub size: f64,
    pub shape: PointShape,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrobLine {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: Color,
    pub size: f64,
    pub linetype: LineType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrobPath {
    pub points: Vec<(f64, f64)>,
    pub color: Color,
    pub size: f64,
    pub linetype: LineType,
}

/// Filled rectangle between two diagonal corners; no border.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrobRect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub fill: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrobText {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Color,
    pub size: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Grob {
    Point(GrobPoint),
    Line(GrobLine),
    Path(GrobPath),
    Rect(GrobRect),
    Text(GrobText),
}

impl Grob {
    pub fn kind(&self) -> &'static str {
        match self {
            Grob::Point(_) => "point",
            Grob::Line(_) => "line",
            Grob::Path(_) => "path",
            Grob::Rect(_) => "rect",
            Grob::Text(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grob_serializes_tagged() {
        let grob = Grob::Rect(GrobRect {
            xmin: 0.0,
            ymin: 1.0,
            xmax: 2.0,
            ymax: 3.0,
            fill: Color::rgba(0x11, 0x22, 0x33, 0x80),
        });
        let json = serde_json::to_value(&grob).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["fill"], "#11223380");
        assert_eq!(grob.kind(), "rect");
    }

    #[test]
    fn test_line_serializes_linetype_name() {
        let grob = Grob::Line(GrobLine {
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
            color: Color::rgb(0, 0, 0),
            size: 1.0,
            linetype: LineType::LongDash,
        });
        let json = serde_json::to_value(&grob).unwrap();
        assert_eq!(json["linetype"], "longdash");
        assert_eq!(json["color"], "#000000");
    }
}
