use crate::aes::{color_accessor, float_accessor, merge_styles, style_accessor, AesMapping};
use crate::frame::Frame;
use crate::geom::Fundamental;
use crate::grob::{Grob, GrobPath, GrobRect};
use crate::plot::{Plot, Theme};
use crate::scale::train_scales;
use crate::style::LineType;

/// Axis-aligned rectangles given by their corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomRect {
    /// Fixed (non-mapped) aesthetics of this geom
    pub style: AesMapping,
}

impl GeomRect {
    pub const NAME: &'static str = "GeomRect";
    pub const NEEDED_SLOTS: &'static [&'static str] = &["xmin", "ymin", "xmax", "ymax"];
    pub const OPTIONAL_SLOTS: &'static [&'static str] =
        &["color", "fill", "linetype", "alpha", "size"];

    pub fn aes(&self, plot: &Plot) -> AesMapping {
        merge_styles(&[&self.style, &plot.theme.rect, &Theme::default_theme().rect])
    }

    pub fn construct(&self, frame: Frame, plot: &mut Plot) -> Vec<Fundamental> {
        train_scales(plot, &frame, "x:xmin,xmax y:ymin,ymax");
        vec![Fundamental::new(self.clone(), frame)]
    }

    /// One filled rect per row, plus a closed outline path unless the
    /// linetype is blank. Fully transparent rows draw nothing.
    pub fn render(&self, plot: &Plot, data: &Frame, style: &AesMapping) -> Vec<Grob> {
        let (xmin, ymin) = (&data["xmin"], &data["ymin"]);
        let (xmax, ymax) = (&data["xmax"], &data["ymax"]);
        let (sx, sy) = plot.position_scales();

        let fill = color_accessor("fill", data, plot, style);
        let color = color_accessor("color", data, plot, style);
        let size = float_accessor("size", data, plot, style);
        let alpha = float_accessor("alpha", data, plot, style);
        let linetype = style_accessor("linetype", data, plot, style);

        let mut grobs = Vec::with_capacity(data.n());
        for i in 0..data.n() {
            let a = alpha.get(i);
            if a == 0.0 {
                continue;
            }

            let (x0, y0) = (sx.pos(xmin.datum(i)), sy.pos(ymin.datum(i)));
            let (x1, y1) = (sx.pos(xmax.datum(i)), sy.pos(ymax.datum(i)));
            grobs.push(Grob::Rect(GrobRect {
                xmin: x0,
                ymin: y0,
                xmax: x1,
                ymax: y1,
                fill: fill.get(i).with_alpha(a),
            }));

            let lt = LineType::from_code(linetype.get(i));
            if lt != LineType::Blank {
                grobs.push(Grob::Path(GrobPath {
                    points: vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)],
                    color: color.get(i).with_alpha(a),
                    size: size.get(i),
                    linetype: lt,
                }));
            }
        }
        grobs
    }
}
