// Library exports for gramgeom

pub mod aes;
pub mod data;
pub mod frame;
pub mod geom;
pub mod grob;
pub mod parser;
pub mod plot;
pub mod runtime;
pub mod scale;
pub mod style;

pub use aes::{merge_styles, AesMapping};
pub use data::PlotData;
pub use frame::{Datum, Field, FieldKind, Frame};
pub use geom::{Fundamental, Geom, PositionAdjust};
pub use grob::Grob;
pub use plot::{Plot, Theme};
pub use runtime::{render_layers, Layer};
pub use scale::{train_scales, Scale, ScaleKind};

use serde::Deserialize;

/// Device size of the chart; sets the output ranges of the x and y scales.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlotOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults_from_json() {
        let opts: PlotOptions = serde_json::from_str(r#"{"width": 320}"#).unwrap();
        assert_eq!(opts, PlotOptions { width: 320, height: 600 });
    }
}
