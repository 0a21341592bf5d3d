use crate::aes::{color_accessor, float_accessor, merge_styles, AesMapping};
use crate::frame::{Datum, Frame};
use crate::geom::Fundamental;
use crate::grob::{Grob, GrobText};
use crate::plot::{Plot, Theme};

/// Text labels placed at x/y.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomText {
    /// Fixed (non-mapped) aesthetics of this geom
    pub style: AesMapping,
}

impl GeomText {
    pub const NAME: &'static str = "GeomText";
    pub const NEEDED_SLOTS: &'static [&'static str] = &["x", "y", "text"];
    pub const OPTIONAL_SLOTS: &'static [&'static str] = &["color", "size", "angle", "alpha"];

    pub fn aes(&self, plot: &Plot) -> AesMapping {
        merge_styles(&[&self.style, &plot.theme.text, &Theme::default_theme().text])
    }

    /// Positions are trained by value, so text columns used as x or y count
    /// by their codes.
    pub fn construct(&self, frame: Frame, plot: &mut Plot) -> Vec<Fundamental> {
        for aes in ["x", "y"] {
            if let Some(scale) = plot.scale_mut(aes) {
                scale.train_by_value(frame[aes].data());
            }
        }
        vec![Fundamental::new(self.clone(), frame)]
    }

    pub fn render(&self, plot: &Plot, data: &Frame, style: &AesMapping) -> Vec<Grob> {
        let (x, y, text) = (&data["x"], &data["y"], &data["text"]);
        let (sx, sy) = plot.position_scales();

        let color = color_accessor("color", data, plot, style);
        let size = float_accessor("size", data, plot, style);
        let alpha = float_accessor("alpha", data, plot, style);
        let angle = float_accessor("angle", data, plot, style);

        (0..data.n())
            .map(|i| {
                Grob::Text(GrobText {
                    x: sx.pos(Datum::Num(x.value(i))),
                    y: sy.pos(Datum::Num(y.value(i))),
                    text: text.text_at(i),
                    color: color.get(i).with_alpha(alpha.get(i)),
                    size: size.get(i),
                    angle: angle.get(i),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Field;
    use crate::style::Color;
    use crate::PlotOptions;
    use approx::assert_relative_eq;

    fn labels() -> Frame {
        Frame::from_fields([
            ("x", Field::float(vec![0.0, 4.0])),
            ("y", Field::float(vec![1.0, 3.0])),
            ("text", Field::text(["lo", "hi"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_text_trains_positions() {
        let mut plot = Plot::default();
        GeomText::default().construct(labels(), &mut plot);
        let (sx, sy) = plot.position_scales();
        assert_eq!(sx.domain(), (0.0, 4.0));
        assert_eq!(sy.domain(), (1.0, 3.0));
    }

    #[test]
    fn test_text_render() {
        let mut plot = Plot::new(PlotOptions { width: 40, height: 20 });
        let geom = GeomText { style: [("angle", "90"), ("color", "blue")].into_iter().collect() };
        let fundamentals = geom.construct(labels(), &mut plot);
        let grobs = fundamentals[0].render(&plot);
        assert_eq!(grobs.len(), 2);

        let Grob::Text(t) = &grobs[1] else { panic!("expected text") };
        assert_eq!(t.text, "hi");
        assert_relative_eq!(t.x, 40.0);
        assert_relative_eq!(t.y, 20.0);
        assert_eq!(t.angle, 90.0);
        assert_eq!(t.size, 12.0);
        assert_eq!(t.color, Color::rgb(0, 0, 0xff));
    }

    #[test]
    fn test_text_numeric_labels() {
        let frame = Frame::from_fields([
            ("x", Field::float(vec![1.0])),
            ("y", Field::float(vec![1.0])),
            ("text", Field::int(vec![42])),
        ])
        .unwrap();
        let mut plot = Plot::default();
        let geom = GeomText::default();
        let grobs = geom.construct(frame, &mut plot)[0].render(&plot);
        let Grob::Text(t) = &grobs[0] else { panic!("expected text") };
        assert_eq!(t.text, "42");
    }
}
