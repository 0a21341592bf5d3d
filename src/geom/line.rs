use crate::aes::{color_accessor, float_accessor, merge_styles, style_accessor, AesMapping};
use crate::frame::Frame;
use crate::geom::Fundamental;
use crate::grob::{Grob, GrobLine, GrobPath};
use crate::plot::{Plot, Theme};
use crate::style::LineType;

/// Aesthetics whose mapping forces per-segment styling.
const SEGMENT_STYLED: [&str; 4] = ["color", "size", "alpha", "linetype"];

/// Line connecting the rows in frame order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomLine {
    /// Fixed (non-mapped) aesthetics of this geom
    pub style: AesMapping,
}

impl GeomLine {
    pub const NAME: &'static str = "GeomLine";
    pub const NEEDED_SLOTS: &'static [&'static str] = &["x", "y"];
    pub const OPTIONAL_SLOTS: &'static [&'static str] = &["color", "size", "linetype", "alpha"];

    pub fn aes(&self, plot: &Plot) -> AesMapping {
        merge_styles(&[&self.style, &plot.theme.line, &Theme::default_theme().line])
    }

    pub fn construct(&self, frame: Frame, _plot: &mut Plot) -> Vec<Fundamental> {
        vec![Fundamental::new(self.clone(), frame)]
    }

    /// A path cannot change style midway, so when any of color, size, alpha
    /// or linetype is mapped every segment becomes its own line, styled from
    /// its starting row. Otherwise the whole line is one path.
    pub fn render(&self, plot: &Plot, data: &Frame, style: &AesMapping) -> Vec<Grob> {
        let (x, y) = (&data["x"], &data["y"]);
        let (sx, sy) = plot.position_scales();

        let color = color_accessor("color", data, plot, style);
        let size = float_accessor("size", data, plot, style);
        let alpha = float_accessor("alpha", data, plot, style);
        let linetype = style_accessor("linetype", data, plot, style);

        let points: Vec<(f64, f64)> =
            (0..data.n()).map(|i| (sx.pos(x.datum(i)), sy.pos(y.datum(i)))).collect();

        if SEGMENT_STYLED.iter().any(|aes| data.has(aes)) {
            points
                .windows(2)
                .enumerate()
                .map(|(i, seg)| {
                    Grob::Line(GrobLine {
                        x0: seg[0].0,
                        y0: seg[0].1,
                        x1: seg[1].0,
                        y1: seg[1].1,
                        color: color.get(i).with_alpha(alpha.get(i)),
                        size: size.get(i),
                        linetype: LineType::from_code(linetype.get(i)),
                    })
                })
                .collect()
        } else if points.is_empty() {
            Vec::new()
        } else {
            vec![Grob::Path(GrobPath {
                points,
                color: color.get(0).with_alpha(alpha.get(0)),
                size: size.get(0),
                linetype: LineType::from_code(linetype.get(0)),
            })]
        }
    }
}
