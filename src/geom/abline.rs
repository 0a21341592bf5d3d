use crate::aes::{color_accessor, float_accessor, merge_styles, style_accessor, AesMapping};
use crate::frame::{Datum, Frame};
use crate::geom::Fundamental;
use crate::grob::{Grob, GrobLine};
use crate::plot::{Plot, Theme};
use crate::style::LineType;
use log::warn;

/// Straight lines `y = intercept + slope * x` across the full x range, one per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomABLine {
    /// Fixed (non-mapped) aesthetics of this geom
    pub style: AesMapping,
}

impl GeomABLine {
    pub const NAME: &'static str = "GeomABLine";
    pub const NEEDED_SLOTS: &'static [&'static str] = &["intercept", "slope"];
    pub const OPTIONAL_SLOTS: &'static [&'static str] = &["color", "size", "linetype", "alpha"];

    pub fn aes(&self, plot: &Plot) -> AesMapping {
        merge_styles(&[&self.style, &plot.theme.line, &Theme::default_theme().line])
    }

    /// Only scale training: the y values at both ends of the trained x domain.
    pub fn construct(&self, frame: Frame, plot: &mut Plot) -> Vec<Fundamental> {
        let (sx, _) = plot.position_scales();
        if sx.is_trained() {
            let (xmin, xmax) = sx.domain();
            let (ic, sc) = (frame["intercept"].data(), frame["slope"].data());
            if let Some(sy) = plot.scale_mut("y") {
                for (intercept, slope) in ic.iter().zip(sc) {
                    sy.train_by_value(&[slope * xmin + intercept, slope * xmax + intercept]);
                }
            }
        } else {
            warn!("x scale is untrained; {} cannot train the y scale", Self::NAME);
        }
        vec![Fundamental::new(self.clone(), frame)]
    }

    pub fn render(&self, plot: &Plot, data: &Frame, style: &AesMapping) -> Vec<Grob> {
        let (ic, sc) = (data["intercept"].data(), data["slope"].data());
        let (sx, sy) = plot.position_scales();

        let color = color_accessor("color", data, plot, style);
        let size = float_accessor("size", data, plot, style);
        let alpha = float_accessor("alpha", data, plot, style);
        let linetype = style_accessor("linetype", data, plot, style);

        let (xmin, xmax) = sx.domain();
        let (x0, x1) = (sx.pos(Datum::Num(xmin)), sx.pos(Datum::Num(xmax)));

        (0..data.n())
            .map(|i| {
                let (intercept, slope) = (ic[i], sc[i]);
                Grob::Line(GrobLine {
                    x0,
                    y0: sy.pos(Datum::Num(xmin * slope + intercept)),
                    x1,
                    y1: sy.pos(Datum::Num(xmax * slope + intercept)),
                    color: color.get(i).with_alpha(alpha.get(i)),
                    size: size.get(i),
                    linetype: LineType::from_code(linetype.get(i)),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Field;
    use crate::PlotOptions;
    use approx::assert_relative_eq;

    fn abline_frame() -> Frame {
        Frame::from_fields([
            ("intercept", Field::float(vec![0.0, 10.0])),
            ("slope", Field::float(vec![1.0, -1.0])),
        ])
        .unwrap()
    }

    #[test]
    fn test_abline_trains_y_from_x_domain() {
        let mut plot = Plot::new(PlotOptions { width: 100, height: 100 });
        plot.scale_mut("x").unwrap().train_by_value(&[0.0, 5.0]);
        let frame = abline_frame();
        let fundamentals = GeomABLine::default().construct(frame.clone(), &mut plot);

        assert_eq!(fundamentals[0].data(), &frame);
        // line 1 spans y 0..5, line 2 spans y 10..5
        assert_eq!(plot.scale("y").unwrap().domain(), (0.0, 10.0));
    }

    #[test]
    fn test_abline_untrained_x_leaves_y_alone() {
        let mut plot = Plot::default();
        GeomABLine::default().construct(abline_frame(), &mut plot);
        assert!(!plot.scale("y").unwrap().is_trained());
    }

    #[test]
    fn test_abline_render_spans_full_width() {
        let mut plot = Plot::new(PlotOptions { width: 100, height: 100 });
        plot.scale_mut("x").unwrap().train_by_value(&[0.0, 5.0]);
        let geom = GeomABLine::default();
        let frame = abline_frame();
        let fundamentals = geom.construct(frame, &mut plot);
        let grobs = fundamentals[0].render(&plot);
        assert_eq!(grobs.len(), 2);

        let Grob::Line(second) = &grobs[1] else { panic!("expected a line") };
        assert_relative_eq!(second.x0, 0.0);
        assert_relative_eq!(second.x1, 100.0);
        assert_relative_eq!(second.y0, 100.0);
        assert_relative_eq!(second.y1, 50.0);
        assert_eq!(second.linetype, LineType::Solid);
    }
}
