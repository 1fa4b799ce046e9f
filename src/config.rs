//! Matrix configuration from properties
//!
//! All defaults live in matrix_properties.json (embedded at compile time) and are
//! read through `PropertyReader`, so there is a single source of truth for them.
//! User values come from an optional flat JSON file; invalid values fall back to
//! the default with a warning.

use std::path::Path;

use crate::deck::SlidePlacement;
use crate::matrix::{
    Color, CoordinatePolicy, ImpactOrder, LayoutOptions, OverflowPolicy, PropertyReader, Result,
};
use crate::render::{PngCompression, RenderOptions};

#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Layout pass tunables (policies, orientation, sub-grid geometry)
    pub layout: LayoutOptions,

    /// Canvas size, fonts and colors
    pub render: RenderOptions,

    /// Picture position on the slide
    pub placement: SlidePlacement,
}

impl MatrixConfig {
    /// Build the configuration from a property reader
    pub fn from_reader(props: &PropertyReader) -> Self {
        let overflow = OverflowPolicy::parse(&props.get_enum("overflow.policy"));
        let coordinates = CoordinatePolicy::parse(&props.get_enum("coordinate.policy"));
        let impact_order = ImpactOrder::parse(&props.get_enum("impact.axis.order"));

        let layout = LayoutOptions {
            overflow,
            coordinates,
            impact_order,
            wrap_width: props.get_usize_in_range("label.wrap.width", 1, 200),
            bubble_radius: props.get_f64_in_range("bubble.radius", 0.001, 0.5),
            bubble_spacing: props.get_f64_in_range("bubble.spacing", 0.001, 0.2),
            bubble_inset: props.get_f64_in_range("bubble.inset", 0.0, 0.5),
            x_title: props.get_string("axis.x.label"),
            y_title: props.get_string("axis.y.label"),
        };

        // Figure size is in inches, as in a plotting library
        let dpi = props.get_f64_in_range("figure.dpi", 10.0, 600.0);
        let width_in = props.get_f64_in_range("figure.width", 1.0, 100.0);
        let height_in = props.get_f64_in_range("figure.height", 1.0, 100.0);

        let material_alpha = props.get_f64_in_range("material.alpha", 0.0, 1.0);
        let render = RenderOptions {
            width_px: (width_in * dpi).round() as u32,
            height_px: (height_in * dpi).round() as u32,
            dpi,
            title: props.get_optional_string("plot.title"),
            bubble_color: Color::opaque(props.get_color("bubble.color")),
            bubble_text_color: Color::opaque(props.get_color("bubble.text.color")),
            material_color: Color::opaque(props.get_color("material.color"))
                .with_alpha(material_alpha),
            material_label: props.get_string("material.label"),
            compression: PngCompression::parse(&props.get_enum("png.compression")),
        };

        let placement = SlidePlacement {
            left: props.get_f64_in_range("deck.image.left", 0.0, 100.0),
            top: props.get_f64_in_range("deck.image.top", 0.0, 100.0),
            width: props.get_f64_in_range("deck.image.width", 0.1, 100.0),
            height: props.get_f64_in_range("deck.image.height", 0.1, 100.0),
            slide_width: props.get_f64_in_range("deck.slide.width", 1.0, 56.0),
            slide_height: props.get_f64_in_range("deck.slide.height", 1.0, 56.0),
        };

        Self {
            layout,
            render,
            placement,
        }
    }

    /// Load user overrides from a JSON property file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let props = PropertyReader::from_file(path)?;
        Ok(Self::from_reader(&props))
    }

    /// Check option combinations the individual range checks cannot catch
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.render.validate()?;
        self.placement.validate()
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self::from_reader(&PropertyReader::default())
    }
}
