//! Columnar data frame consumed by the geoms.
//!
//! Every column is stored as `f64` values. Text columns store codes into a
//! per-field intern table; codes are handed out in first-encounter order so
//! code `k` is the `k`-th distinct string of the column.

use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

/// Spacing reported by [`Field::resolution`] when a field has fewer than two
/// distinct values.
pub const DEFAULT_RESOLUTION: f64 = 1.0;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Int,
    Text,
}

/// A single cell of a field as seen by a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Datum<'a> {
    Num(f64),
    Level(&'a str),
}

impl From<f64> for Datum<'_> {
    fn from(v: f64) -> Self {
        Datum::Num(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    kind: FieldKind,
    data: Vec<f64>,
    levels: Vec<String>,
}

impl Field {
    pub fn float(data: Vec<f64>) -> Self {
        Field { kind: FieldKind::Float, data, levels: Vec::new() }
    }

    pub fn int(data: Vec<i64>) -> Self {
        Field {
            kind: FieldKind::Int,
            data: data.into_iter().map(|v| v as f64).collect(),
            levels: Vec::new(),
        }
    }

    /// Build a text field, interning the values in encounter order.
    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lookup: HashMap<String, usize> = HashMap::new();
        let mut levels = Vec::new();
        let mut data = Vec::new();
        for value in values {
            let value = value.into();
            let code = match lookup.get(&value) {
                Some(&code) => code,
                None => {
                    let code = levels.len();
                    lookup.insert(value.clone(), code);
                    levels.push(value);
                    code
                }
            };
            data.push(code as f64);
        }
        Field { kind: FieldKind::Text, data, levels }
    }

    /// A float field of `n` copies of `value`.
    pub fn constant(value: f64, n: usize) -> Self {
        Field::float(vec![value; n])
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_discrete(&self) -> bool {
        self.kind == FieldKind::Text
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw values; codes for text fields.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn value(&self, row: usize) -> f64 {
        self.data[row]
    }

    /// Intern table of a text field, indexed by code.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Recover the string for a code. Unknown codes yield "".
    pub fn string(&self, code: f64) -> &str {
        if code < 0.0 {
            return "";
        }
        self.levels.get(code as usize).map(String::as_str).unwrap_or("")
    }

    pub fn datum(&self, row: usize) -> Datum<'_> {
        match self.kind {
            FieldKind::Text => Datum::Level(self.string(self.data[row])),
            FieldKind::Float | FieldKind::Int => Datum::Num(self.data[row]),
        }
    }

    /// Render the cell at `row` as text.
    pub fn text_at(&self, row: usize) -> String {
        match self.kind {
            FieldKind::Text => self.string(self.data[row]).to_string(),
            FieldKind::Float | FieldKind::Int => self.data[row].to_string(),
        }
    }

    /// Minimal positive spacing between distinct sorted values.
    pub fn resolution(&self) -> f64 {
        let mut values: Vec<f64> = self.data.iter().copied().filter(|v| !v.is_nan()).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        values
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| *d > 0.0)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))))
            .unwrap_or(DEFAULT_RESOLUTION)
    }
}

/// Named fields of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    n: usize,
    columns: BTreeMap<String, Field>,
}

impl Frame {
    pub fn new(n: usize) -> Self {
        Frame { n, columns: BTreeMap::new() }
    }

    /// Build a frame from named fields; the first field fixes the row count.
    pub fn from_fields<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Field)>,
        S: Into<String>,
    {
        let mut fields = fields.into_iter().peekable();
        let n = fields.peek().map_or(0, |(_, f)| f.len());
        let mut frame = Frame::new(n);
        for (name, field) in fields {
            frame.insert(name, field)?;
        }
        Ok(frame)
    }

    /// Number of rows.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn has(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.columns.get(name)
    }

    /// Add or replace a column.
    pub fn insert(&mut self, name: impl Into<String>, field: Field) -> Result<()> {
        let name = name.into();
        if field.len() != self.n {
            bail!(
                "Column '{}' has {} values but the frame has {} rows",
                name,
                field.len(),
                self.n
            );
        }
        self.columns.insert(name, field);
        Ok(())
    }

    /// Infallible [`Frame::insert`] for columns derived from this frame.
    pub(crate) fn set(&mut self, name: &str, field: Field) {
        assert_eq!(field.len(), self.n, "derived column '{}' has the wrong length", name);
        self.columns.insert(name.to_string(), field);
    }

    pub fn delete(&mut self, name: &str) -> Option<Field> {
        self.columns.remove(name)
    }

    /// A constant float column matching this frame's row count.
    pub fn constant(&self, value: f64) -> Field {
        Field::constant(value, self.n)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

impl Index<&str> for Frame {
    type Output = Field;

    /// # Panics
    ///
    /// Panics if the frame has no column `name`.
    fn index(&self, name: &str) -> &Field {
        match self.columns.get(name) {
            Some(field) => field,
            None => panic!("frame has no column '{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_interning_encounter_order() {
        let f = Field::text(["b", "a", "b", "c"]);
        assert_eq!(f.data(), &[0.0, 1.0, 0.0, 2.0]);
        assert_eq!(f.levels(), &["b", "a", "c"]);
        assert_eq!(f.string(1.0), "a");
        assert_eq!(f.string(7.0), "");
        assert_eq!(f.datum(3), Datum::Level("c"));
        assert_eq!(f.text_at(2), "b");
    }

    #[test]
    fn test_resolution() {
        assert_eq!(Field::float(vec![3.0, 1.0, 1.5, 3.0]).resolution(), 0.5);
        assert_eq!(Field::int(vec![10, 20, 40]).resolution(), 10.0);
    }

    #[test]
    fn test_resolution_sentinel() {
        assert_eq!(Field::float(vec![]).resolution(), DEFAULT_RESOLUTION);
        assert_eq!(Field::float(vec![2.0, 2.0]).resolution(), DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut frame = Frame::new(2);
        assert!(frame.insert("x", Field::float(vec![1.0, 2.0])).is_ok());
        assert!(frame.insert("y", Field::float(vec![1.0])).is_err());
        assert!(frame.has("x"));
        assert!(!frame.has("y"));
    }

    #[test]
    fn test_constant_and_delete() {
        let mut frame = Frame::from_fields([("x", Field::float(vec![1.0, 2.0, 3.0]))]).unwrap();
        let w = frame.constant(0.9);
        assert_eq!(w.data(), &[0.9, 0.9, 0.9]);
        frame.insert("width", w).unwrap();
        assert!(frame.delete("width").is_some());
        assert!(frame.delete("width").is_none());
        assert_eq!(frame.names().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    #[should_panic(expected = "no column 'y'")]
    fn test_index_missing_column() {
        let frame = Frame::new(0);
        let _ = &frame["y"];
    }
}
