use crate::aes::{color_accessor, float_accessor, merge_styles, style_accessor, AesMapping};
use crate::frame::Frame;
use crate::geom::Fundamental;
use crate::grob::{Grob, GrobPoint};
use crate::plot::{Plot, Theme};
use crate::style::PointShape;

/// Scatter plot: one point per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomPoint {
    /// Fixed (non-mapped) aesthetics of this geom
    pub style: AesMapping,
}

impl GeomPoint {
    pub const NAME: &'static str = "GeomPoint";
    pub const NEEDED_SLOTS: &'static [&'static str] = &["x", "y"];
    pub const OPTIONAL_SLOTS: &'static [&'static str] = &["color", "size", "shape", "alpha"];

    pub fn aes(&self, plot: &Plot) -> AesMapping {
        merge_styles(&[&self.style, &plot.theme.point, &Theme::default_theme().point])
    }

    pub fn construct(&self, frame: Frame, _plot: &mut Plot) -> Vec<Fundamental> {
        vec![Fundamental::new(self.clone(), frame)]
    }

    pub fn render(&self, plot: &Plot, data: &Frame, style: &AesMapping) -> Vec<Grob> {
        let (x, y) = (&data["x"], &data["y"]);
        let (sx, sy) = plot.position_scales();

        let color = color_accessor("color", data, plot, style);
        let size = float_accessor("size", data, plot, style);
        let alpha = float_accessor("alpha", data, plot, style);
        let shape = style_accessor("shape", data, plot, style);

        (0..data.n())
            .map(|i| {
                Grob::Point(GrobPoint {
                    x: sx.pos(x.datum(i)),
                    y: sy.pos(y.datum(i)),
                    color: color.get(i).with_alpha(alpha.get(i)),
                    size: size.get(i),
                    shape: PointShape::from_code(shape.get(i)),
                })
            })
            .collect()
    }
}
