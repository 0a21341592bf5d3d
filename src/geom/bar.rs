use crate::aes::{merge_styles, AesMapping};
use crate::frame::{Field, Frame};
use crate::geom::{Fundamental, GeomRect, PositionAdjust};
use crate::plot::{Plot, Theme};
use crate::scale::train_scales;
use std::collections::HashMap;

/// Share of the x resolution a bar occupies when no width is mapped.
pub const DEFAULT_BAR_WIDTH: f64 = 0.9;

/// Bars from the zero baseline to y, turned into rectangles during construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeomBar {
    /// Fixed (non-mapped) aesthetics of this geom
    pub style: AesMapping,
    pub position: PositionAdjust,
}

/// Grouping key for rows sharing an x value; folds -0.0 into 0.0.
fn x_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else {
        x.to_bits()
    }
}

impl GeomBar {
    pub const NAME: &'static str = "GeomBar";
    pub const NEEDED_SLOTS: &'static [&'static str] = &["x", "y"];
    pub const OPTIONAL_SLOTS: &'static [&'static str] =
        &["width", "color", "fill", "size", "linetype", "alpha"];

    pub fn new(position: PositionAdjust) -> Self {
        GeomBar { style: AesMapping::new(), position }
    }

    pub fn aes(&self, plot: &Plot) -> AesMapping {
        merge_styles(&[&self.style, &plot.theme.bar, &Theme::default_theme().bar])
    }

    /// Rewrite x/y/width into xmin/ymin/xmax/ymax, apply the position
    /// adjustment, retrain the position scales and hand over to a rect.
    pub fn construct(&self, mut frame: Frame, plot: &mut Plot) -> Vec<Fundamental> {
        let n = frame.n();
        if !frame.has("width") {
            let width = frame["x"].resolution() * DEFAULT_BAR_WIDTH;
            frame.set("width", frame.constant(width));
        }

        let xd = frame["x"].data();
        let yd = frame["y"].data();
        let wd = frame["width"].data();

        let mut xmin = vec![0.0; n];
        let mut xmax = vec![0.0; n];
        let mut ymin = vec![0.0; n];
        let mut ymax = vec![0.0; n];

        for i in 0..n {
            // A bar never straddles the baseline.
            if yd[i] > 0.0 {
                ymax[i] = yd[i];
            } else {
                ymin[i] = yd[i];
            }
            let half = wd[i] / 2.0;
            xmin[i] = xd[i] - half;
            xmax[i] = xd[i] + half;
        }

        match self.position {
            PositionAdjust::Identity => {}
            PositionAdjust::Stack => {
                stack(xd, &mut ymin, &mut ymax);
            }
            PositionAdjust::Fill => {
                let totals = stack(xd, &mut ymin, &mut ymax);
                for i in 0..n {
                    let total = totals[&x_key(xd[i])];
                    if total > 0.0 {
                        ymin[i] /= total;
                        ymax[i] /= total;
                    }
                }
            }
            PositionAdjust::Dodge => dodge(xd, wd, &mut xmin, &mut xmax),
        }

        frame.set("xmin", Field::float(xmin));
        frame.set("ymin", Field::float(ymin));
        frame.set("xmax", Field::float(xmax));
        frame.set("ymax", Field::float(ymax));
        frame.delete("width");
        frame.delete("x");
        frame.delete("y");

        train_scales(plot, &frame, "x:xmin,xmax y:ymin,ymax");

        let rect = GeomRect { style: self.style.clone() };
        vec![Fundamental::new(rect, frame)]
    }
}

/// Pile rows sharing an x on top of each other in encounter order. Each row
/// occupies `[offset, offset + height]` where offset is the total height of
/// the earlier rows at that x. Rows with a missing height collapse to zero
/// height at their offset. Returns the total height per x.
fn stack(xd: &[f64], ymin: &mut [f64], ymax: &mut [f64]) -> HashMap<u64, f64> {
    let mut running: HashMap<u64, f64> = HashMap::new();
    for i in 0..xd.len() {
        let height = ymax[i] - ymin[i];
        let height = if height.is_finite() { height } else { 0.0 };
        let offset = running.entry(x_key(xd[i])).or_insert(0.0);
        ymin[i] = *offset;
        ymax[i] = *offset + height;
        *offset += height;
    }
    running
}

/// Split the width at each x into equal slices, one per row, placed left to
/// right in encounter order.
///
/// ```text
///      +------------------- width -----------------+
/// n=3  |--------------|--------------|--------------|
/// n=4  |----------|----------|----------|----------|
/// ```
fn dodge(xd: &[f64], wd: &[f64], xmin: &mut [f64], xmax: &mut [f64]) {
    let mut bars_at: HashMap<u64, usize> = HashMap::new();
    for &x in xd {
        *bars_at.entry(x_key(x)).or_insert(0) += 1;
    }

    let mut slot: HashMap<u64, usize> = HashMap::new();
    for i in 0..xd.len() {
        let key = x_key(xd[i]);
        let n = bars_at[&key] as f64;
        let j = slot.entry(key).or_insert(0);
        let left = xd[i] - wd[i] / 2.0;
        let slice = wd[i] / n;
        xmin[i] = left + *j as f64 * slice;
        xmax[i] = left + (*j + 1) as f64 * slice;
        *j += 1;
    }
}
