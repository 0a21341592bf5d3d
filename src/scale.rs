use crate::frame::{Datum, Field, Frame};
use crate::parser::parse_train_spec;
use crate::plot::Plot;
use crate::style::Color;
use log::debug;
use plotters::style::{Color as _, HSLColor};

/// Domain assumed by a scale that has never been trained.
pub const UNTRAINED_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Default endpoints of the continuous color gradient.
pub const GRADIENT_LOW: Color = Color::rgb(0x13, 0x2b, 0x43);
pub const GRADIENT_HIGH: Color = Color::rgb(0x56, 0xb1, 0xf7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Continuous,
    Discrete,
}

/// Domain tracker and value mapper for one aesthetic.
///
/// A scale starts out continuous and untrained. Training with a text field
/// turns it discrete: level `k` (in encounter order) sits at domain
/// coordinate `k`, so numeric codes of the same field line up with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    aesthetic: String,
    kind: ScaleKind,
    domain: Option<(f64, f64)>,
    levels: Vec<String>,
    range: (f64, f64),
    gradient: (Color, Color),
}

impl Scale {
    pub fn new(aesthetic: impl Into<String>, range: (f64, f64)) -> Self {
        Scale {
            aesthetic: aesthetic.into(),
            kind: ScaleKind::Continuous,
            domain: None,
            levels: Vec::new(),
            range,
            gradient: (GRADIENT_LOW, GRADIENT_HIGH),
        }
    }

    pub fn with_gradient(mut self, low: Color, high: Color) -> Self {
        self.gradient = (low, high);
        self
    }

    pub fn aesthetic(&self) -> &str {
        &self.aesthetic
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn is_trained(&self) -> bool {
        self.domain.is_some() || !self.levels.is_empty()
    }

    // === Training ===

    /// Fold every value of `field` into the domain.
    pub fn train(&mut self, field: &Field) {
        if field.is_discrete() {
            self.kind = ScaleKind::Discrete;
            for level in field.levels() {
                if !self.levels.contains(level) {
                    self.levels.push(level.clone());
                }
            }
        } else {
            self.train_by_value(field.data());
        }
    }

    /// Fold computed values that do not live in a column. Non-finite values are ignored.
    pub fn train_by_value(&mut self, values: &[f64]) {
        for &v in values.iter().filter(|v| v.is_finite()) {
            self.domain = Some(match self.domain {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
    }

    /// Effective domain, unioning numeric training with the discrete slots.
    pub fn domain(&self) -> (f64, f64) {
        let slots = if self.levels.is_empty() {
            None
        } else {
            Some((-0.5, self.levels.len() as f64 - 0.5))
        };
        match (self.domain, slots) {
            (Some((lo, hi)), Some((slo, shi))) => (lo.min(slo), hi.max(shi)),
            (Some(d), None) | (None, Some(d)) => d,
            (None, None) => UNTRAINED_DOMAIN,
        }
    }

    // === Mapping ===

    fn to_domain(&self, datum: Datum<'_>) -> f64 {
        match datum {
            Datum::Num(v) => v,
            Datum::Level(s) => self
                .levels
                .iter()
                .position(|l| l == s)
                .map_or(f64::NAN, |i| i as f64),
        }
    }

    /// Relative position of `v` inside the domain; degenerate domains map to the middle.
    fn fraction(&self, v: f64) -> f64 {
        let (lo, hi) = self.domain();
        if hi == lo {
            0.5
        } else {
            (v - lo) / (hi - lo)
        }
    }

    /// Map a domain value linearly onto the output range.
    pub fn pos(&self, datum: Datum<'_>) -> f64 {
        let t = self.fraction(self.to_domain(datum));
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Map a domain value to a color: hue wheel for discrete scales,
    /// two-color gradient for continuous ones.
    pub fn color(&self, datum: Datum<'_>) -> Color {
        let v = self.to_domain(datum);
        if v.is_nan() {
            return Color::SENTINEL;
        }
        match self.kind {
            ScaleKind::Discrete => hue(v.round() as i64, self.levels.len()),
            ScaleKind::Continuous => {
                let t = self.fraction(v).clamp(0.0, 1.0);
                let (low, high) = self.gradient;
                let lerp = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
                Color::rgb(lerp(low.r, high.r), lerp(low.g, high.g), lerp(low.b, high.b))
            }
        }
    }

    /// Map a domain value to a discrete style code. Code 0 is reserved for
    /// "blank", so discrete levels start at 1.
    pub fn style(&self, datum: Datum<'_>) -> i64 {
        let v = self.to_domain(datum);
        match self.kind {
            ScaleKind::Discrete if !v.is_nan() => v.round() as i64 + 1,
            _ => v.round() as i64,
        }
    }
}

/// `index`-th of `n` evenly spaced hues.
fn hue(index: i64, n: usize) -> Color {
    let n = n.max(1) as f64;
    let h = ((15.0 / 360.0) + index as f64 / n).rem_euclid(1.0);
    let (r, g, b) = HSLColor(h, 0.65, 0.55).rgb();
    Color::rgb(r, g, b)
}

/// Train plot scales from frame columns according to a spec like
/// `"x:xmin,xmax y:ymin,ymax"`.
///
/// Unknown scales and missing fields are skipped.
pub fn train_scales(plot: &mut Plot, df: &Frame, spec: &str) {
    for clause in parse_train_spec(spec) {
        let Some(scale) = plot.scale_mut(clause.scale) else {
            debug!("No scale named '{}', skipping", clause.scale);
            continue;
        };
        for name in clause.fields {
            match df.get(name) {
                Some(field) => scale.train(field),
                None => debug!("Field '{}' not in frame, not training '{}'", name, clause.scale),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlotOptions;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_untrained() {
        let s = Scale::new("x", (0.0, 100.0));
        assert!(!s.is_trained());
        assert_eq!(s.domain(), UNTRAINED_DOMAIN);
        assert_relative_eq!(s.pos(0.5.into()), 50.0);
    }

    #[test]
    fn test_scale_continuous() {
        let mut s = Scale::new("x", (0.0, 100.0));
        s.train(&Field::float(vec![2.0, 4.0, 12.0]));
        s.train_by_value(&[f64::NAN, -8.0]);
        assert_eq!(s.domain(), (-8.0, 12.0));
        assert_relative_eq!(s.pos(2.0.into()), 50.0);
        assert_relative_eq!(s.pos(12.0.into()), 100.0);
    }

    #[test]
    fn test_scale_degenerate_domain() {
        let mut s = Scale::new("y", (0.0, 10.0));
        s.train_by_value(&[3.0]);
        assert_relative_eq!(s.pos(3.0.into()), 5.0);
    }

    #[test]
    fn test_scale_discrete() {
        let mut s = Scale::new("x", (0.0, 30.0));
        s.train(&Field::text(["b", "a", "b"]));
        s.train(&Field::text(["c", "a"]));
        assert_eq!(s.kind(), ScaleKind::Discrete);
        assert_eq!(s.levels(), &["b", "a", "c"]);
        assert_eq!(s.domain(), (-0.5, 2.5));
        assert_relative_eq!(s.pos(Datum::Level("b")), 5.0);
        assert_relative_eq!(s.pos(Datum::Level("c")), 25.0);
        assert_relative_eq!(s.pos(1.0.into()), 15.0);
        assert!(s.pos(Datum::Level("zzz")).is_nan());
    }

    #[test]
    fn test_scale_style_codes() {
        let mut s = Scale::new("shape", (0.0, 1.0));
        s.train(&Field::text(["x", "y"]));
        assert_eq!(s.style(Datum::Level("x")), 1);
        assert_eq!(s.style(Datum::Level("y")), 2);
        assert_eq!(s.style(Datum::Level("nope")), 0);

        let c = Scale::new("linetype", (0.0, 1.0));
        assert_eq!(c.style(2.6.into()), 3);
    }

    #[test]
    fn test_scale_color_gradient() {
        let mut s = Scale::new("color", (0.0, 1.0));
        s.train_by_value(&[0.0, 10.0]);
        assert_eq!(s.color(0.0.into()), GRADIENT_LOW);
        assert_eq!(s.color(10.0.into()), GRADIENT_HIGH);
        assert_eq!(s.color(50.0.into()), GRADIENT_HIGH);
    }

    #[test]
    fn test_scale_color_discrete_distinct() {
        let mut s = Scale::new("color", (0.0, 1.0));
        s.train(&Field::text(["a", "b", "c"]));
        let a = s.color(Datum::Level("a"));
        let b = s.color(Datum::Level("b"));
        assert_ne!(a, b);
        assert!(a.is_opaque());
        assert_eq!(s.color(Datum::Level("missing")), Color::SENTINEL);
    }

    #[test]
    fn test_train_scales_tolerant() {
        let mut plot = Plot::new(PlotOptions::default());
        let df = Frame::from_fields([
            ("xmin", Field::float(vec![1.0, 2.0])),
            ("xmax", Field::float(vec![3.0, 4.0])),
        ])
        .unwrap();
        train_scales(&mut plot, &df, "x:xmin,xmax,nothere bogus:xmin y:ymin");
        assert_eq!(plot.scale("x").unwrap().domain(), (1.0, 4.0));
        assert!(!plot.scale("y").unwrap().is_trained());
    }
}
