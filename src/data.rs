use crate::frame::{Field, Frame};
use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// Headers plus string rows, as delivered by a loader.
#[derive(Debug, Clone)]
pub struct PlotData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PlotData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create PlotData from a JSON Array of Objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        if array.is_empty() {
            return Err(anyhow!("Input data array is empty"));
        }

        // Headers come from the first object
        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::new();
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            let mut row = Vec::new();
            for header in &headers {
                let val_str = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", header)),
                };
                row.push(val_str);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Convert to a frame, typing each column as the narrowest of int,
    /// float and text that holds every cell. Empty cells are missing
    /// values: they read as NaN and force a numeric column to float.
    pub fn to_frame(&self) -> Result<Frame> {
        let mut frame = Frame::new(self.rows.len());
        for (col, header) in self.headers.iter().enumerate() {
            let cells = self
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    row.get(col)
                        .map(|s| s.trim())
                        .ok_or_else(|| anyhow!("Row {} has no value for column '{}'", i, header))
                })
                .collect::<Result<Vec<&str>>>()?;
            frame
                .insert(header.clone(), infer_field(&cells))
                .with_context(|| format!("Failed to add column '{}'", header))?;
        }
        Ok(frame)
    }
}

fn infer_field(cells: &[&str]) -> Field {
    if let Some(ints) = cells.iter().map(|s| s.parse::<i64>().ok()).collect::<Option<Vec<_>>>() {
        return Field::int(ints);
    }

    let floats = cells
        .iter()
        .map(|s| if s.is_empty() { Some(f64::NAN) } else { s.parse::<f64>().ok() })
        .collect::<Option<Vec<_>>>();
    match floats {
        Some(floats) if cells.iter().any(|s| !s.is_empty()) => Field::float(floats),
        _ => Field::text(cells.iter().copied()),
    }
}
