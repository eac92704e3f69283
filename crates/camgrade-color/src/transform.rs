//! Transform definitions.
//!
//! Transforms are plain descriptions. They are compiled into a
//! [`Processor`](crate::Processor) by a [`TransformProvider`](crate::TransformProvider),
//! which resolves any names they reference.
//!
//! | Transform | Effect |
//! |-----------|--------|
//! | [`ColorSpaceTransform`] | named space to named space |
//! | [`CdlTransform`] | ASC slope/offset/power |
//! | [`MatrixTransform`] | 3x3 matrix |
//! | [`DisplayViewTransform`] | named space to a display/view |
//! | [`GroupTransform`] | ordered list |

use camgrade_core::DisplayTarget;

use crate::Mat3;

/// Any transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Named color space conversion.
    ColorSpace(ColorSpaceTransform),
    /// ASC CDL.
    Cdl(CdlTransform),
    /// 3x3 matrix.
    Matrix(MatrixTransform),
    /// Display/view output.
    DisplayView(DisplayViewTransform),
    /// Nested group.
    Group(GroupTransform),
}

impl Transform {
    /// Output transform from `src` to a display target.
    ///
    /// A bare name becomes a [`ColorSpaceTransform`], a display/view pair a
    /// [`DisplayViewTransform`].
    pub fn to_display(src: &str, target: &DisplayTarget) -> Self {
        match target {
            DisplayTarget::Space(name) => ColorSpaceTransform::new(src, name.as_str()).into(),
            DisplayTarget::View { display, view } => {
                DisplayViewTransform::new(src, display.as_str(), view.as_str()).into()
            }
        }
    }
}

impl From<ColorSpaceTransform> for Transform {
    fn from(t: ColorSpaceTransform) -> Self {
        Self::ColorSpace(t)
    }
}

impl From<CdlTransform> for Transform {
    fn from(t: CdlTransform) -> Self {
        Self::Cdl(t)
    }
}

impl From<MatrixTransform> for Transform {
    fn from(t: MatrixTransform) -> Self {
        Self::Matrix(t)
    }
}

impl From<DisplayViewTransform> for Transform {
    fn from(t: DisplayViewTransform) -> Self {
        Self::DisplayView(t)
    }
}

impl From<GroupTransform> for Transform {
    fn from(t: GroupTransform) -> Self {
        Self::Group(t)
    }
}

/// Conversion between two named color spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSpaceTransform {
    /// Source color space.
    pub src: String,
    /// Destination color space.
    pub dst: String,
}

impl ColorSpaceTransform {
    /// Creates a conversion from `src` to `dst`.
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// How CDL handles values that go negative before the power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CdlStyle {
    /// ASC CDL v1.2: `max(x * slope + offset, 0) ^ power`.
    #[default]
    AscCdl,
    /// Sign-mirrored power, negatives pass through.
    NoClamp,
}

/// ASC color decision list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdlTransform {
    /// Per-channel slope [R, G, B].
    pub slope: [f32; 3],
    /// Per-channel offset [R, G, B].
    pub offset: [f32; 3],
    /// Per-channel power [R, G, B].
    pub power: [f32; 3],
    /// Clamping style.
    pub style: CdlStyle,
}

impl Default for CdlTransform {
    fn default() -> Self {
        Self {
            slope: [1.0; 3],
            offset: [0.0; 3],
            power: [1.0; 3],
            style: CdlStyle::default(),
        }
    }
}

impl CdlTransform {
    /// Same slope, offset and power on all channels.
    pub fn uniform(slope: f32, offset: f32, power: f32) -> Self {
        Self {
            slope: [slope; 3],
            offset: [offset; 3],
            power: [power; 3],
            style: CdlStyle::default(),
        }
    }

    /// Sets the clamping style.
    pub fn with_style(mut self, style: CdlStyle) -> Self {
        self.style = style;
        self
    }

    /// True when the transform leaves [0, 1] values unchanged.
    pub fn is_identity(&self) -> bool {
        self.slope == [1.0; 3] && self.offset == [0.0; 3] && self.power == [1.0; 3]
    }
}

/// Linear 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixTransform {
    /// Row-major matrix.
    pub matrix: Mat3,
}

impl MatrixTransform {
    /// Wraps a matrix.
    pub fn new(matrix: Mat3) -> Self {
        Self { matrix }
    }

    /// Per-channel scale.
    pub fn diagonal(scale: [f32; 3]) -> Self {
        Self::new(Mat3::diagonal(scale[0], scale[1], scale[2]))
    }
}

/// Conversion from a named space to a display/view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayViewTransform {
    /// Source color space.
    pub src: String,
    /// Display name.
    pub display: String,
    /// View name.
    pub view: String,
}

impl DisplayViewTransform {
    /// Creates a display/view transform.
    pub fn new(src: impl Into<String>, display: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            display: display.into(),
            view: view.into(),
        }
    }
}

/// Ordered chain of transforms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupTransform {
    /// Transforms, applied first to last.
    pub transforms: Vec<Transform>,
}

impl GroupTransform {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, t: impl Into<Transform>) {
        self.transforms.push(t.into());
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, t: impl Into<Transform>) -> Self {
        self.push(t);
        self
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// True when the group has no children.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
