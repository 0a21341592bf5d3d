//! Geoms: the statistical/positional transform and per-row rendering for
//! each kind of mark.
//!
//! Every geom goes through two steps:
//! 1. `construct` transforms its frame (and trains scales) and yields one or
//!    more [`Fundamental`]s, each pairing a renderable geom with its frame.
//! 2. `render` evaluates the aesthetics row by row into [`Grob`]s.
//!
//! A bar never renders itself: its construction rewrites the frame into
//! rectangle bounds and hands it to a [`GeomRect`].

mod abline;
mod bar;
mod line;
mod point;
mod rect;
mod text;

pub use abline::GeomABLine;
pub use bar::GeomBar;
pub use line::GeomLine;
pub use point::GeomPoint;
pub use rect::GeomRect;
pub use text::GeomText;

use crate::aes::AesMapping;
use crate::frame::Frame;
use crate::grob::Grob;
use crate::plot::Plot;
use serde::{Deserialize, Serialize};

/// How bars sharing an x value are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionAdjust {
    /// Bars at the same x overlap.
    #[default]
    Identity,
    Stack,
    /// Stack, then normalize each x to a total height of 1.
    Fill,
    Dodge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geom {
    Point(GeomPoint),
    Line(GeomLine),
    ABLine(GeomABLine),
    Bar(GeomBar),
    Rect(GeomRect),
    Text(GeomText),
}

impl Geom {
    pub fn name(&self) -> &'static str {
        match self {
            Geom::Point(_) => GeomPoint::NAME,
            Geom::Line(_) => GeomLine::NAME,
            Geom::ABLine(_) => GeomABLine::NAME,
            Geom::Bar(_) => GeomBar::NAME,
            Geom::Rect(_) => GeomRect::NAME,
            Geom::Text(_) => GeomText::NAME,
        }
    }

    /// Columns the frame must carry before `construct`.
    pub fn needed_slots(&self) -> &'static [&'static str] {
        match self {
            Geom::Point(_) => GeomPoint::NEEDED_SLOTS,
            Geom::Line(_) => GeomLine::NEEDED_SLOTS,
            Geom::ABLine(_) => GeomABLine::NEEDED_SLOTS,
            Geom::Bar(_) => GeomBar::NEEDED_SLOTS,
            Geom::Rect(_) => GeomRect::NEEDED_SLOTS,
            Geom::Text(_) => GeomText::NEEDED_SLOTS,
        }
    }

    /// Aesthetics that may be mapped or fall back to a fixed style.
    pub fn optional_slots(&self) -> &'static [&'static str] {
        match self {
            Geom::Point(_) => GeomPoint::OPTIONAL_SLOTS,
            Geom::Line(_) => GeomLine::OPTIONAL_SLOTS,
            Geom::ABLine(_) => GeomABLine::OPTIONAL_SLOTS,
            Geom::Bar(_) => GeomBar::OPTIONAL_SLOTS,
            Geom::Rect(_) => GeomRect::OPTIONAL_SLOTS,
            Geom::Text(_) => GeomText::OPTIONAL_SLOTS,
        }
    }

    /// Whether `construct` trains the x/y scales itself.
    pub fn trains_position(&self) -> bool {
        match self {
            Geom::Point(_) | Geom::Line(_) => false,
            Geom::ABLine(_) | Geom::Bar(_) | Geom::Rect(_) | Geom::Text(_) => true,
        }
    }

    /// Merged fixed style: geom style, then plot theme, then default theme.
    pub fn aes(&self, plot: &Plot) -> AesMapping {
        match self {
            Geom::Point(g) => g.aes(plot),
            Geom::Line(g) => g.aes(plot),
            Geom::ABLine(g) => g.aes(plot),
            Geom::Bar(g) => g.aes(plot),
            Geom::Rect(g) => g.aes(plot),
            Geom::Text(g) => g.aes(plot),
        }
    }

    pub fn construct(&self, frame: Frame, plot: &mut Plot) -> Vec<Fundamental> {
        match self {
            Geom::Point(g) => g.construct(frame, plot),
            Geom::Line(g) => g.construct(frame, plot),
            Geom::ABLine(g) => g.construct(frame, plot),
            Geom::Bar(g) => g.construct(frame, plot),
            Geom::Rect(g) => g.construct(frame, plot),
            Geom::Text(g) => g.construct(frame, plot),
        }
    }

    /// # Panics
    ///
    /// Panics for [`Geom::Bar`], which only exists until construction.
    pub fn render(&self, plot: &Plot, data: &Frame, style: &AesMapping) -> Vec<Grob> {
        match self {
            Geom::Point(g) => g.render(plot, data, style),
            Geom::Line(g) => g.render(plot, data, style),
            Geom::ABLine(g) => g.render(plot, data, style),
            Geom::Bar(_) => {
                panic!("GeomBar has no render of its own; construct it into a GeomRect")
            }
            Geom::Rect(g) => g.render(plot, data, style),
            Geom::Text(g) => g.render(plot, data, style),
        }
    }
}

impl From<GeomPoint> for Geom {
    fn from(g: GeomPoint) -> Self {
        Geom::Point(g)
    }
}

impl From<GeomLine> for Geom {
    fn from(g: GeomLine) -> Self {
        Geom::Line(g)
    }
}

impl From<GeomABLine> for Geom {
    fn from(g: GeomABLine) -> Self {
        Geom::ABLine(g)
    }
}

impl From<GeomBar> for Geom {
    fn from(g: GeomBar) -> Self {
        Geom::Bar(g)
    }
}

impl From<GeomRect> for Geom {
    fn from(g: GeomRect) -> Self {
        Geom::Rect(g)
    }
}

impl From<GeomText> for Geom {
    fn from(g: GeomText) -> Self {
        Geom::Text(g)
    }
}

/// A constructed geom paired with the frame it renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Fundamental {
    geom: Geom,
    data: Frame,
}

impl Fundamental {
    pub fn new(geom: impl Into<Geom>, data: Frame) -> Self {
        Fundamental { geom: geom.into(), data }
    }

    pub fn geom(&self) -> &Geom {
        &self.geom
    }

    pub fn data(&self) -> &Frame {
        &self.data
    }

    pub fn into_parts(self) -> (Geom, Frame) {
        (self.geom, self.data)
    }

    /// Render with the geom's merged default style.
    pub fn render(&self, plot: &Plot) -> Vec<Grob> {
        let style = self.geom.aes(plot);
        self.geom.render(plot, &self.data, &style)
    }
}
