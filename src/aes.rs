//! Aesthetic mappings and the per-row accessors built from them.
//!
//! An accessor resolves one aesthetic for every row of a frame. If the frame
//! carries a column named after the aesthetic the value goes through the
//! plot's scale of that name; otherwise the fixed style string is decoded
//! once, when the accessor is built, and returned for every row.

use crate::frame::{Datum, Field, Frame};
use crate::plot::Plot;
use crate::scale::Scale;
use crate::style::{parse_color, parse_float, parse_linetype, parse_shape, Color};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aesthetic name to style string (or, in a layer mapping, to column name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AesMapping(BTreeMap<String, String>);

impl AesMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, aes: &str) -> Option<&str> {
        self.0.get(aes).map(String::as_str)
    }

    pub fn insert(&mut self, aes: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(aes.into(), value.into())
    }

    pub fn contains(&self, aes: &str) -> bool {
        self.0.contains_key(aes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AesMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AesMapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Union of mappings in priority order: a key set by an earlier mapping is
/// never overwritten by a later one.
pub fn merge_styles(mappings: &[&AesMapping]) -> AesMapping {
    let mut result = AesMapping::new();
    for mapping in mappings {
        for (k, v) in mapping.0.iter() {
            result.0.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
    result
}

// === Accessors ===

/// Per-row value source for one aesthetic.
pub enum Accessor<'a, T> {
    Mapped {
        field: &'a Field,
        scale: Option<&'a Scale>,
        eval: fn(Option<&Scale>, Datum<'_>) -> T,
    },
    Fixed(T),
}

impl<T: Clone> Accessor<'_, T> {
    pub fn get(&self, row: usize) -> T {
        match self {
            Accessor::Mapped { field, scale, eval } => eval(*scale, field.datum(row)),
            Accessor::Fixed(value) => value.clone(),
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Accessor::Mapped { .. })
    }
}

/// Bounds applied when decoding a fixed float style.
fn float_bounds(aes: &str) -> (f64, f64) {
    match aes {
        "alpha" => (0.0, 1.0),
        "size" => (0.0, f64::INFINITY),
        _ => (f64::NEG_INFINITY, f64::INFINITY),
    }
}

fn mapped<'a, T>(
    aes: &str,
    data: &'a Frame,
    plot: &'a Plot,
    eval: fn(Option<&Scale>, Datum<'_>) -> T,
) -> Option<Accessor<'a, T>> {
    data.get(aes).map(|field| Accessor::Mapped { field, scale: plot.scale(aes), eval })
}

pub fn color_accessor<'a>(
    aes: &str,
    data: &'a Frame,
    plot: &'a Plot,
    style: &AesMapping,
) -> Accessor<'a, Color> {
    mapped(aes, data, plot, |scale, datum| match (scale, datum) {
        (Some(scale), datum) => scale.color(datum),
        (None, Datum::Level(s)) => parse_color(s),
        (None, Datum::Num(_)) => Color::SENTINEL,
    })
    .unwrap_or_else(|| Accessor::Fixed(parse_color(style.get(aes).unwrap_or_default())))
}

pub fn float_accessor<'a>(
    aes: &str,
    data: &'a Frame,
    plot: &'a Plot,
    style: &AesMapping,
) -> Accessor<'a, f64> {
    mapped(aes, data, plot, |scale, datum| match (scale, datum) {
        (Some(scale), datum) => scale.pos(datum),
        (None, Datum::Num(v)) => v,
        (None, Datum::Level(s)) => parse_float(s, f64::NEG_INFINITY, f64::INFINITY),
    })
    .unwrap_or_else(|| {
        let (low, high) = float_bounds(aes);
        Accessor::Fixed(parse_float(style.get(aes).unwrap_or_default(), low, high))
    })
}

/// Decode a style string for a discrete aesthetic into its code.
fn style_code(aes: &str, value: &str) -> i64 {
    match aes {
        "shape" => parse_shape(value).code(),
        "linetype" => parse_linetype(value).code(),
        _ => {
            debug!("No discrete style decoder for '{}'", aes);
            value.trim().parse().unwrap_or(0)
        }
    }
}

fn mapped_style_code(aes: &str, scale: Option<&Scale>, datum: Datum<'_>) -> i64 {
    match (scale, datum) {
        (Some(scale), datum) => scale.style(datum),
        (None, Datum::Num(v)) => v.round() as i64,
        (None, Datum::Level(s)) => style_code(aes, s),
    }
}

/// Accessor for discrete style codes (`shape`, `linetype`).
pub fn style_accessor<'a>(
    aes: &str,
    data: &'a Frame,
    plot: &'a Plot,
    style: &AesMapping,
) -> Accessor<'a, i64> {
    let eval: fn(Option<&Scale>, Datum<'_>) -> i64 = match aes {
        "shape" => |scale, datum| mapped_style_code("shape", scale, datum),
        "linetype" => |scale, datum| mapped_style_code("linetype", scale, datum),
        _ => |scale, datum| mapped_style_code("", scale, datum),
    };
    mapped(aes, data, plot, eval)
        .unwrap_or_else(|| Accessor::Fixed(style_code(aes, style.get(aes).unwrap_or_default())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{LineType, PointShape};
    use crate::PlotOptions;

    fn style(pairs: &[(&str, &str)]) -> AesMapping {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_merge_first_writer_wins() {
        let a = style(&[("color", "red")]);
        let b = style(&[("color", "blue"), ("size", "2")]);
        let c = style(&[("size", "9"), ("alpha", "0.5")]);
        let merged = merge_styles(&[&a, &b, &c]);
        assert_eq!(merged.get("color"), Some("red"));
        assert_eq!(merged.get("size"), Some("2"));
        assert_eq!(merged.get("alpha"), Some("0.5"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_idempotent() {
        let a = style(&[("color", "red"), ("size", "2")]);
        assert_eq!(merge_styles(&[&a, &a]), a);
        assert_eq!(merge_styles(&[&AesMapping::new(), &a]), a);
    }

    #[test]
    fn test_fixed_accessors() {
        let plot = Plot::new(PlotOptions::default());
        let data = Frame::new(3);
        let st = style(&[
            ("color", "blue"),
            ("alpha", "150%"),
            ("shape", "star"),
            ("linetype", "x"),
        ]);

        let color = color_accessor("color", &data, &plot, &st);
        assert!(!color.is_mapped());
        assert_eq!(color.get(2), Color::rgb(0, 0, 0xff));
        assert_eq!(float_accessor("alpha", &data, &plot, &st).get(0), 1.0);
        assert_eq!(float_accessor("size", &data, &plot, &st).get(0), 0.5);
        assert_eq!(style_accessor("shape", &data, &plot, &st).get(1), PointShape::Star.code());
        assert_eq!(style_accessor("linetype", &data, &plot, &st).get(1), LineType::Blank.code());
    }

    #[test]
    fn test_mapped_accessor_uses_scale() {
        let mut plot = Plot::new(PlotOptions::default());
        let data = Frame::from_fields([("size", Field::float(vec![0.0, 5.0, 10.0]))]).unwrap();
        plot.scale_mut("size").unwrap().train(&data["size"]);

        let size = float_accessor("size", &data, &plot, &AesMapping::new());
        assert!(size.is_mapped());
        let (lo, hi) = plot.scale("size").unwrap().range();
        assert_eq!(size.get(0), lo);
        assert_eq!(size.get(2), hi);
    }

    #[test]
    fn test_mapped_accessor_without_scale() {
        let plot = Plot::new(PlotOptions::default());
        let data = Frame::from_fields([
            ("weight", Field::float(vec![4.0])),
            ("tint", Field::text(["#00ff00"])),
        ])
        .unwrap();
        assert_eq!(float_accessor("weight", &data, &plot, &AesMapping::new()).get(0), 4.0);
        assert_eq!(
            color_accessor("tint", &data, &plot, &AesMapping::new()).get(0),
            Color::rgb(0, 0xff, 0)
        );
    }

    #[test]
    fn test_mapped_style_names_without_scale() {
        let mut plot = Plot::new(PlotOptions::default());
        plot.remove_scale("linetype");
        plot.remove_scale("shape");
        let data = Frame::from_fields([
            ("linetype", Field::text(["dashed", "3", "bogus"])),
            ("shape", Field::text(["star", "plus", "circle"])),
        ])
        .unwrap();
        let none = AesMapping::new();

        let linetype = style_accessor("linetype", &data, &plot, &none);
        assert!(linetype.is_mapped());
        assert_eq!(linetype.get(0), LineType::Dashed.code());
        assert_eq!(linetype.get(1), LineType::Dotted.code());
        assert_eq!(linetype.get(2), LineType::Blank.code());

        let shape = style_accessor("shape", &data, &plot, &none);
        assert_eq!(shape.get(0), PointShape::Star.code());
        assert_eq!(shape.get(2), PointShape::Circle.code());
    }
}
