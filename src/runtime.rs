// Runtime executor: data frame + layers -> primitives

use crate::aes::AesMapping;
use crate::frame::Frame;
use crate::geom::{Fundamental, Geom};
use crate::grob::Grob;
use crate::plot::Plot;
use anyhow::{bail, Context, Result};
use log::debug;

/// One geom plus the columns feeding its aesthetics.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub geom: Geom,
    /// Aesthetic name to column name in the input frame
    pub mapping: AesMapping,
}

impl Layer {
    pub fn new(geom: impl Into<Geom>) -> Self {
        Layer { geom: geom.into(), mapping: AesMapping::new() }
    }

    /// Map aesthetic `aes` to input column `column`.
    pub fn map(mut self, aes: &str, column: &str) -> Self {
        self.mapping.insert(aes, column);
        self
    }

    /// Select the mapped columns of `data`, renamed to their aesthetics.
    pub fn prepare(&self, data: &Frame) -> Result<Frame> {
        let mut frame = Frame::new(data.n());
        for (aes, column) in self.mapping.iter() {
            let Some(field) = data.get(column) else {
                bail!(
                    "{} maps '{}' to column '{}', which does not exist",
                    self.geom.name(),
                    aes,
                    column
                );
            };
            frame.insert(aes, field.clone())?;
        }

        for slot in self.geom.needed_slots() {
            if !frame.has(slot) {
                bail!("{} requires aesthetic '{}'", self.geom.name(), slot);
            }
        }
        Ok(frame)
    }
}

/// Run every layer through prepare, scale training and construction, then
/// render the results in layer order.
///
/// ABLine layers are constructed after all others so they see the final
/// x domain.
pub fn render_layers(plot: &mut Plot, layers: &[Layer], data: &Frame) -> Result<Vec<Grob>> {
    let frames = layers
        .iter()
        .enumerate()
        .map(|(i, layer)| layer.prepare(data).with_context(|| format!("Layer {} is invalid", i)))
        .collect::<Result<Vec<Frame>>>()?;

    for (layer, frame) in layers.iter().zip(&frames) {
        train_mapped(plot, &layer.geom, frame);
    }

    let mut constructed: Vec<Option<Vec<Fundamental>>> = vec![None; layers.len()];
    let (ablines, others): (Vec<usize>, Vec<usize>) =
        (0..layers.len()).partition(|&i| matches!(layers[i].geom, Geom::ABLine(_)));
    let mut frames: Vec<Option<Frame>> = frames.into_iter().map(Some).collect();

    for i in others.into_iter().chain(ablines) {
        let Some(frame) = frames[i].take() else { continue };
        let n = frame.n();
        let fundamentals = layers[i].geom.construct(frame, plot);
        debug!(
            "Constructed {} ({} rows) into {} fundamental(s)",
            layers[i].geom.name(),
            n,
            fundamentals.len()
        );
        constructed[i] = Some(fundamentals);
    }

    let fundamentals: Vec<Fundamental> = constructed.into_iter().flatten().flatten().collect();
    Ok(render_fundamentals(plot, &fundamentals))
}

/// Render constructed fundamentals with their merged default styles.
pub fn render_fundamentals(plot: &Plot, fundamentals: &[Fundamental]) -> Vec<Grob> {
    let mut grobs = Vec::new();
    for fundamental in fundamentals {
        let rendered = fundamental.render(plot);
        debug!("Rendered {} into {} grob(s)", fundamental.geom().name(), rendered.len());
        grobs.extend(rendered);
    }
    grobs
}

/// Train the scale of every mapped aesthetic. Position scales are left to
/// geoms that train them during construction.
fn train_mapped(plot: &mut Plot, geom: &Geom, frame: &Frame) {
    for aes in frame.names() {
        if matches!(aes, "x" | "y") && geom.trains_position() {
            continue;
        }
        match plot.scale_mut(aes) {
            Some(scale) => scale.train(&frame[aes]),
            None => debug!("No scale for mapped aesthetic '{}'", aes),
        }
    }
}
