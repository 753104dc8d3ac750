//! Affine transform gizmo types and configuration.
//!
//! The gizmo is made of six handles: one translation arrow and one rotation
//! ring per coordinate axis.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::{parse_color, DARK_YELLOW};
use crate::error::{Result, VizkitError};

/// Arrow length relative to `target length * scale`.
pub const ARROW_LENGTH_FACTOR: f32 = 1.15;

/// Ring radius relative to `target length * scale`.
pub const RING_RADIUS_FACTOR: f32 = 1.6;

/// A coordinate axis of the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the axis index (0 = X, 1 = Y, 2 = Z).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the axis for an index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the unit direction vector for this axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Returns the next axis in cyclic order (X -> Y -> Z -> X).
    ///
    /// Translation drags are constrained to the plane whose normal is the
    /// next axis, which always contains the dragged axis.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// What a handle does when dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Arrow translating along the axis.
    Translation(Axis),
    /// Ring rotating about the axis.
    Rotation(Axis),
}

impl HandleKind {
    /// Returns the axis this handle acts on.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            HandleKind::Translation(axis) | HandleKind::Rotation(axis) => axis,
        }
    }

    /// Returns whether this handle is a translation arrow.
    #[must_use]
    pub fn is_translation(self) -> bool {
        matches!(self, HandleKind::Translation(_))
    }
}

/// Base colors for the three axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisColors {
    /// Color of the X handles.
    pub x: Vec3,
    /// Color of the Y handles.
    pub y: Vec3,
    /// Color of the Z handles.
    pub z: Vec3,
}

impl Default for AxisColors {
    fn default() -> Self {
        // tomato, seagreen, mediumblue
        Self {
            x: Vec3::new(1.0, 99.0 / 255.0, 71.0 / 255.0),
            y: Vec3::new(46.0 / 255.0, 139.0 / 255.0, 87.0 / 255.0),
            z: Vec3::new(0.0, 0.0, 205.0 / 255.0),
        }
    }
}

impl AxisColors {
    /// Creates axis colors from explicit RGB triples.
    #[must_use]
    pub fn new(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { x, y, z }
    }

    /// Resolves axis colors from color names or hex strings.
    pub fn from_names(names: [&str; 3]) -> Result<Self> {
        Ok(Self {
            x: parse_color(names[0])?,
            y: parse_color(names[1])?,
            z: parse_color(names[2])?,
        })
    }

    /// Returns the base color for an axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> Vec3 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Configuration for the affine transform widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineWidgetConfig {
    /// Pivot of rotation and anchor of the handles. Defaults to the target center.
    pub origin: Option<Vec3>,
    /// Whether to enable the widget immediately after construction.
    pub start: bool,
    /// Size of the widget relative to the target length.
    pub scale: f32,
    /// Relative radius of the arrow shafts and ring tubes.
    pub line_radius: f32,
    /// Relative radius of the arrow tips.
    pub tip_radius: f32,
    /// Render the gizmo in front of the scene regardless of depth.
    pub always_visible: bool,
    /// Base axis colors.
    pub axes_colors: AxisColors,
    /// Color of the hovered or dragged handle.
    pub highlight_color: Vec3,
}

impl Default for AffineWidgetConfig {
    fn default() -> Self {
        Self {
            origin: None,
            start: true,
            scale: 0.15,
            line_radius: 0.02,
            tip_radius: 0.05,
            always_visible: true,
            axes_colors: AxisColors::default(),
            highlight_color: DARK_YELLOW,
        }
    }
}

impl AffineWidgetConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("loaded affine widget config: {config:?}");
        Ok(config)
    }

    /// Sets the widget origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets whether the widget starts enabled.
    #[must_use]
    pub fn with_start(mut self, start: bool) -> Self {
        self.start = start;
        self
    }

    /// Sets the widget scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the line radius.
    #[must_use]
    pub fn with_line_radius(mut self, line_radius: f32) -> Self {
        self.line_radius = line_radius;
        self
    }

    /// Sets the arrow tip radius.
    #[must_use]
    pub fn with_tip_radius(mut self, tip_radius: f32) -> Self {
        self.tip_radius = tip_radius;
        self
    }

    /// Sets whether the gizmo is always drawn on top.
    #[must_use]
    pub fn with_always_visible(mut self, always_visible: bool) -> Self {
        self.always_visible = always_visible;
        self
    }

    /// Sets the axis colors.
    #[must_use]
    pub fn with_axes_colors(mut self, colors: AxisColors) -> Self {
        self.axes_colors = colors;
        self
    }

    /// Sets the highlight color.
    #[must_use]
    pub fn with_highlight_color(mut self, color: Vec3) -> Self {
        self.highlight_color = color;
        self
    }

    /// Checks that every parameter is usable for building the gizmo.
    pub fn validate(&self) -> Result<()> {
        check_positive("scale", self.scale)?;
        check_positive("line_radius", self.line_radius)?;
        check_positive("tip_radius", self.tip_radius)?;
        if let Some(origin) = self.origin {
            if !origin.is_finite() {
                return Err(VizkitError::InvalidArgument(format!(
                    "origin must be finite, got {origin}"
                )));
            }
        }
        Ok(())
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VizkitError::InvalidArgument(format!(
            "`{name}` must be a positive finite number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_cycle() {
        assert_eq!(Axis::X.next(), Axis::Y);
        assert_eq!(Axis::Y.next(), Axis::Z);
        assert_eq!(Axis::Z.next(), Axis::X);
        for axis in Axis::ALL {
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
            assert_eq!(axis.unit().dot(axis.next().unit()), 0.0);
        }
        assert_eq!(Axis::from_index(3), None);
    }

    #[test]
    fn test_handle_kind() {
        assert_eq!(HandleKind::Rotation(Axis::Y).axis(), Axis::Y);
        assert!(HandleKind::Translation(Axis::Z).is_translation());
        assert!(!HandleKind::Rotation(Axis::Z).is_translation());
    }

    #[test]
    fn test_axis_colors_from_names() {
        let colors = AxisColors::from_names(["r", "g", "b"]).unwrap();
        assert_eq!(colors.get(Axis::X), Vec3::X);
        assert_eq!(colors.get(Axis::Z), Vec3::Z);
        assert!(AxisColors::from_names(["r", "nope", "b"]).is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(AffineWidgetConfig::new().validate().is_ok());
        assert!(AffineWidgetConfig::new().with_scale(0.0).validate().is_err());
        assert!(AffineWidgetConfig::new()
            .with_line_radius(f32::NAN)
            .validate()
            .is_err());
        assert!(AffineWidgetConfig::new()
            .with_origin(Vec3::new(f32::INFINITY, 0.0, 0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config =
            AffineWidgetConfig::from_json(r#"{ "scale": 0.3, "always_visible": false }"#).unwrap();
        assert_eq!(config.scale, 0.3);
        assert!(!config.always_visible);
        assert_eq!(config.line_radius, 0.02);
        assert!(config.start);

        assert!(matches!(
            AffineWidgetConfig::from_json("{ not json"),
            Err(VizkitError::Json(_))
        ));
        assert!(matches!(
            AffineWidgetConfig::from_json(r#"{ "scale": -1.0 }"#),
            Err(VizkitError::InvalidArgument(_))
        ));
    }
}
