//! Plot context: the named scale table and per-geom theme defaults shared by
//! every geom of one chart.
//!
//! Scales are only mutated through `&mut Plot` during construction, which
//! gives each scale a single writer. Rendering borrows the plot immutably, so
//! fundamentals can be rendered from several threads at once.

use crate::aes::AesMapping;
use crate::scale::Scale;
use crate::PlotOptions;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Default fixed style for each geom kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub point: AesMapping,
    pub line: AesMapping,
    pub bar: AesMapping,
    pub rect: AesMapping,
    pub text: AesMapping,
}

static DEFAULT_THEME: LazyLock<Theme> = LazyLock::new(|| {
    let style = |pairs: &[(&str, &str)]| pairs.iter().copied().collect::<AesMapping>();
    Theme {
        point: style(&[
            ("color", "black"),
            ("size", "3"),
            ("shape", "solidcircle"),
            ("alpha", "1"),
        ]),
        line: style(&[
            ("color", "black"),
            ("size", "1"),
            ("linetype", "solid"),
            ("alpha", "1"),
        ]),
        bar: style(&[
            ("fill", "gray20"),
            ("color", "black"),
            ("size", "1"),
            ("linetype", "blank"),
            ("alpha", "1"),
        ]),
        rect: style(&[
            ("fill", "gray40"),
            ("color", "black"),
            ("size", "1"),
            ("linetype", "blank"),
            ("alpha", "1"),
        ]),
        text: style(&[
            ("color", "black"),
            ("size", "12"),
            ("angle", "0"),
            ("alpha", "1"),
        ]),
    }
});

impl Theme {
    /// Process-wide defaults, consulted after the plot's own theme.
    pub fn default_theme() -> &'static Theme {
        &DEFAULT_THEME
    }
}

/// Scale table and theme of one chart.
#[derive(Debug, Clone)]
pub struct Plot {
    pub options: PlotOptions,
    pub theme: Theme,
    scales: BTreeMap<String, Scale>,
}

impl Plot {
    /// Create a plot with untrained scales for every standard aesthetic.
    pub fn new(options: PlotOptions) -> Self {
        let width = options.width as f64;
        let height = options.height as f64;
        let scales = [
            Scale::new("x", (0.0, width)),
            Scale::new("y", (0.0, height)),
            Scale::new("color", (0.0, 1.0)),
            Scale::new("fill", (0.0, 1.0)),
            Scale::new("size", (1.0, 6.0)),
            Scale::new("alpha", (0.1, 1.0)),
            Scale::new("angle", (0.0, 360.0)),
            Scale::new("shape", (0.0, 1.0)),
            Scale::new("linetype", (0.0, 1.0)),
        ]
        .into_iter()
        .map(|s| (s.aesthetic().to_string(), s))
        .collect();

        Plot { options, theme: Theme::default(), scales }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn scale(&self, name: &str) -> Option<&Scale> {
        self.scales.get(name)
    }

    pub fn scale_mut(&mut self, name: &str) -> Option<&mut Scale> {
        self.scales.get_mut(name)
    }

    /// Add a scale, replacing any scale for the same aesthetic.
    pub fn add_scale(&mut self, scale: Scale) {
        self.scales.insert(scale.aesthetic().to_string(), scale);
    }

    pub fn remove_scale(&mut self, name: &str) -> Option<Scale> {
        self.scales.remove(name)
    }

    pub fn scales(&self) -> impl Iterator<Item = &Scale> {
        self.scales.values()
    }

    /// The x and y scales. Every plot has both.
    pub fn position_scales(&self) -> (&Scale, &Scale) {
        (&self.scales["x"], &self.scales["y"])
    }
}

impl Default for Plot {
    fn default() -> Self {
        Plot::new(PlotOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_scales() {
        let plot = Plot::new(PlotOptions { width: 400, height: 300 });
        let (x, y) = plot.position_scales();
        assert_eq!(x.range(), (0.0, 400.0));
        assert_eq!(y.range(), (0.0, 300.0));
        assert!(plot.scale("alpha").is_some());
        assert!(plot.scale("wobble").is_none());
    }

    #[test]
    fn test_add_scale_replaces() {
        let mut plot = Plot::default();
        plot.add_scale(Scale::new("size", (2.0, 20.0)));
        assert_eq!(plot.scale("size").unwrap().range(), (2.0, 20.0));
        assert_eq!(plot.scales().count(), 9);
    }

    #[test]
    fn test_theme_from_json() {
        let theme: Theme = serde_json::from_str(r#"{"point": {"color": "red"}}"#).unwrap();
        assert_eq!(theme.point.get("color"), Some("red"));
        assert!(theme.rect.is_empty());
    }

    #[test]
    fn test_default_theme_covers_every_geom() {
        let t = Theme::default_theme();
        for style in [&t.point, &t.line, &t.bar, &t.rect, &t.text] {
            assert!(style.contains("color"));
            assert!(style.contains("alpha"));
        }
    }
}
