//! Color configuration: named spaces, displays and transform compilation.
//!
//! A [`Config`] is the concrete [`TransformProvider`] of the workspace. It
//! resolves the names inside a [`GroupTransform`] and compiles the chain to
//! a [`Processor`].
//!
//! # YAML schema
//!
//! ```yaml
//! name: studio
//! inherit_builtin: true        # start from builtin::config()
//! colorspaces:
//!   - name: Linear Rec.709
//!     aliases: [lin_709]
//!     primaries: rec709        # or {r: [x, y], g: [x, y], b: [x, y], w: [x, y]}
//!     transfer: linear         # linear | srgb | bt1886 | gamma <exp>
//!   - name: Raw
//!     is_data: true
//! displays:
//!   - name: Monitor
//!     views:
//!       - {name: Standard, colorspace: Linear Rec.709}
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, trace};

use crate::colorspace::ColorSpace;
use crate::display::{Display, View};
use crate::error::{ColorError, ColorResult};
use crate::primaries::{Primaries, rgb_to_rgb_matrix};
use crate::processor::{Processor, ProcessorOp, RgbTransform, TransformProvider};
use crate::transfer::TransferFn;
use crate::transform::{ColorSpaceTransform, DisplayViewTransform, GroupTransform, Transform};

/// Set of named color spaces and displays.
#[derive(Debug, Clone, Default)]
pub struct Config {
    name: String,
    colorspaces: Vec<ColorSpace>,
    displays: Vec<Display>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    name: String,
    #[serde(default)]
    inherit_builtin: bool,
    #[serde(default)]
    colorspaces: Vec<RawColorSpace>,
    #[serde(default)]
    displays: Vec<Display>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawColorSpace {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    primaries: Option<RawPrimaries>,
    #[serde(default)]
    transfer: TransferFn,
    #[serde(default)]
    is_data: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrimaries {
    Named(String),
    Custom(Primaries),
}

impl RawColorSpace {
    fn into_colorspace(self) -> ColorResult<ColorSpace> {
        let mut builder = ColorSpace::builder(&self.name)
            .description(self.description)
            .transfer(self.transfer);
        for alias in self.aliases {
            builder = builder.alias(alias);
        }
        match self.primaries {
            Some(RawPrimaries::Named(n)) => {
                let p = Primaries::by_name(&n).ok_or_else(|| {
                    ColorError::Validation(format!("color space '{}': unknown primaries '{n}'", self.name))
                })?;
                builder = builder.primaries(p);
            }
            Some(RawPrimaries::Custom(p)) => builder = builder.primaries(p),
            None if !self.is_data => {
                return Err(ColorError::Validation(format!(
                    "color space '{}' needs primaries or is_data: true",
                    self.name
                )));
            }
            None => {}
        }
        Ok(builder.is_data(self.is_data).build())
    }
}

impl Config {
    /// Empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in config, see [`crate::builtin`].
    pub fn builtin() -> Self {
        crate::builtin::config()
    }

    /// Loads a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> ColorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ColorError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            colorspaces = config.colorspaces.len(),
            displays = config.displays.len(),
            "loaded color config"
        );
        Ok(config)
    }

    /// Parses a YAML config and validates it.
    pub fn from_yaml_str(yaml: &str) -> ColorResult<Self> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        let mut config = if raw.inherit_builtin { Self::builtin() } else { Self::new() };
        if !raw.name.is_empty() {
            config.name = raw.name;
        }
        for cs in raw.colorspaces {
            config.add_colorspace(cs.into_colorspace()?);
        }
        for display in raw.displays {
            config.add_display(display);
        }
        config.validate()?;
        Ok(config)
    }

    /// Config name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the config name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// All color spaces.
    #[inline]
    pub fn colorspaces(&self) -> &[ColorSpace] {
        &self.colorspaces
    }

    /// Finds a color space by name or alias, ignoring ASCII case.
    pub fn colorspace(&self, name: &str) -> Option<&ColorSpace> {
        self.colorspaces.iter().find(|cs| cs.matches_name(name))
    }

    /// Iterates color space names.
    pub fn colorspace_names(&self) -> impl Iterator<Item = &str> {
        self.colorspaces.iter().map(ColorSpace::name)
    }

    /// All displays.
    #[inline]
    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    /// Finds a display by name, ignoring ASCII case.
    pub fn display(&self, name: &str) -> Option<&Display> {
        self.displays.iter().find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// Adds a color space, replacing one with the same name.
    pub fn add_colorspace(&mut self, cs: ColorSpace) {
        if let Some(existing) = self
            .colorspaces
            .iter_mut()
            .find(|c| c.name().eq_ignore_ascii_case(cs.name()))
        {
            *existing = cs;
        } else {
            self.colorspaces.push(cs);
        }
    }

    /// Adds a display, replacing one with the same name.
    pub fn add_display(&mut self, display: Display) {
        if let Some(existing) = self
            .displays
            .iter_mut()
            .find(|d| d.name().eq_ignore_ascii_case(display.name()))
        {
            *existing = display;
        } else {
            self.displays.push(display);
        }
    }

    /// Checks names are unique and every view targets a known space.
    pub fn validate(&self) -> ColorResult<()> {
        for (i, cs) in self.colorspaces.iter().enumerate() {
            if cs.name().trim().is_empty() {
                return Err(ColorError::Validation("color space with empty name".into()));
            }
            let names = std::iter::once(cs.name()).chain(cs.aliases().iter().map(String::as_str));
            for n in names {
                if let Some(other) = self.colorspaces[..i].iter().find(|o| o.matches_name(n)) {
                    return Err(ColorError::Validation(format!(
                        "name '{n}' of '{}' already used by '{}'",
                        cs.name(),
                        other.name()
                    )));
                }
            }
        }
        for display in &self.displays {
            if display.views().is_empty() {
                return Err(ColorError::Validation(format!(
                    "display '{}' has no views",
                    display.name()
                )));
            }
            for view in display.views() {
                if self.colorspace(view.colorspace()).is_none() {
                    return Err(ColorError::Validation(format!(
                        "view '{}' of display '{}' targets unknown color space '{}'",
                        view.name(),
                        display.name(),
                        view.colorspace()
                    )));
                }
            }
        }
        Ok(())
    }

    fn require(&self, name: &str) -> ColorResult<&ColorSpace> {
        self.colorspace(name).ok_or_else(|| ColorError::ColorSpaceNotFound { name: name.into() })
    }

    /// Resolves a display/view pair to its view.
    pub fn view(&self, display: &str, view: &str) -> ColorResult<&View> {
        let d = self
            .display(display)
            .ok_or_else(|| ColorError::DisplayNotFound { name: display.into() })?;
        d.view(view).ok_or_else(|| ColorError::ViewNotFound {
            display: display.into(),
            view: view.into(),
        })
    }

    /// Resolves a conversion target.
    ///
    /// A display name stands for its first view, anything else must be a
    /// color space.
    pub fn target_colorspace(&self, name: &str) -> ColorResult<&ColorSpace> {
        if let Some(view) = self.display(name).and_then(Display::default_view) {
            trace!(display = name, view = view.name(), "display used as target, taking first view");
            return self.require(view.colorspace());
        }
        self.require(name)
    }

    /// Compiles any transform into a processor.
    pub fn compile(&self, transform: &Transform) -> ColorResult<Processor> {
        let mut ops = Vec::new();
        self.push_ops(transform, &mut ops)?;
        let processor = Processor::from_ops(ops);
        debug!(ops = processor.num_ops(), "compiled processor");
        Ok(processor)
    }

    /// Compiles a conversion between two named spaces.
    pub fn processor_between(&self, src: &str, dst: &str) -> ColorResult<Processor> {
        self.compile(&ColorSpaceTransform::new(src, dst).into())
    }

    fn push_ops(&self, transform: &Transform, ops: &mut Vec<ProcessorOp>) -> ColorResult<()> {
        match transform {
            Transform::ColorSpace(t) => {
                let src = self.require(&t.src)?;
                let dst = self.target_colorspace(&t.dst)?;
                push_conversion(src, dst, ops);
            }
            Transform::DisplayView(DisplayViewTransform { src, display, view }) => {
                let src = self.require(src)?;
                let view = self.view(display, view)?;
                let dst = self.require(view.colorspace())?;
                push_conversion(src, dst, ops);
            }
            Transform::Cdl(cdl) => {
                for (label, values) in [("slope", cdl.slope), ("offset", cdl.offset), ("power", cdl.power)] {
                    if values.iter().any(|v| !v.is_finite()) {
                        return Err(ColorError::InvalidTransform {
                            reason: format!("CDL {label} is not finite: {values:?}"),
                        });
                    }
                }
                ops.push(ProcessorOp::Cdl {
                    slope: cdl.slope,
                    offset: cdl.offset,
                    power: cdl.power,
                    style: cdl.style,
                });
            }
            Transform::Matrix(m) => {
                if m.matrix.m.iter().flatten().any(|v| !v.is_finite()) {
                    return Err(ColorError::InvalidTransform {
                        reason: "matrix has non-finite entries".into(),
                    });
                }
                ops.push(ProcessorOp::Matrix(m.matrix));
            }
            Transform::Group(g) => {
                for t in &g.transforms {
                    self.push_ops(t, ops)?;
                }
            }
        }
        Ok(())
    }
}

fn push_conversion(src: &ColorSpace, dst: &ColorSpace, ops: &mut Vec<ProcessorOp>) {
    if src.name() == dst.name() || src.is_data() || dst.is_data() {
        return;
    }
    let (Some(sp), Some(dp)) = (src.primaries(), dst.primaries()) else {
        return;
    };
    ops.push(ProcessorOp::Decode(src.transfer()));
    if sp != dp {
        ops.push(ProcessorOp::Matrix(rgb_to_rgb_matrix(sp, dp)));
    }
    ops.push(ProcessorOp::Encode(dst.transfer()));
}

impl TransformProvider for Config {
    fn processor(&self, group: &GroupTransform) -> ColorResult<Box<dyn RgbTransform>> {
        let mut ops = Vec::new();
        for t in &group.transforms {
            self.push_ops(t, &mut ops)?;
        }
        let processor = Processor::from_ops(ops);
        debug!(
            transforms = group.len(),
            ops = processor.num_ops(),
            "compiled group transform"
        );
        Ok(Box::new(processor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::names;
    use crate::transform::{CdlTransform, MatrixTransform};
    use approx::assert_relative_eq;
    use std::io::Write;

    fn run(p: &dyn RgbTransform, rgb: [f32; 3]) -> [f32; 3] {
        let mut px = [rgb];
        p.apply_rgb(&mut px);
        px[0]
    }

    #[test]
    fn lookup_is_case_insensitive_and_by_alias() {
        let c = Config::builtin();
        assert_eq!(c.colorspace("acescg").map(ColorSpace::name), Some("ACEScg"));
        assert_eq!(c.colorspace("lin_ap1").map(ColorSpace::name), Some("ACEScg"));
        assert!(c.display("SRGB - DISPLAY").is_some());
    }

    #[test]
    fn identical_spaces_compile_to_nothing() {
        let c = Config::builtin();
        let p = c.processor_between("ACEScg", "acescg").unwrap();
        assert_eq!(p.num_ops(), 0);
    }

    #[test]
    fn data_spaces_never_convert() {
        let c = Config::builtin();
        assert_eq!(c.processor_between("Raw", "ACEScg").unwrap().num_ops(), 0);
        assert_eq!(c.processor_between(names::SRGB_DISPLAY, "Raw").unwrap().num_ops(), 0);
    }

    #[test]
    fn same_primaries_skip_matrix() {
        let c = Config::builtin();
        let p = c.processor_between(names::SRGB_ENCODED_REC709, names::LINEAR_REC709).unwrap();
        assert_eq!(p.ops(), &[ProcessorOp::Decode(TransferFn::Srgb)]);
    }

    #[test]
    fn srgb_roundtrip_through_acescg() {
        let c = Config::builtin();
        let group = GroupTransform::new()
            .with(ColorSpaceTransform::new(names::SRGB_ENCODED_REC709, names::ACESCG))
            .with(DisplayViewTransform::new(names::ACESCG, names::SRGB_DISPLAY, names::VIEW_UNTONEMAPPED));
        let p = c.processor(&group).unwrap();
        for rgb in [[0.5, 0.5, 0.5], [0.2, 0.6, 0.9], [1.0, 0.0, 0.3]] {
            let out = run(p.as_ref(), rgb);
            for i in 0..3 {
                assert_relative_eq!(out[i], rgb[i], epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn gray_stays_neutral_in_acescg() {
        let c = Config::builtin();
        let p = c.processor_between(names::LINEAR_REC709, names::ACESCG).unwrap();
        let out = run(&p, [0.18, 0.18, 0.18]);
        assert_relative_eq!(out[0], 0.18, epsilon = 1e-3);
        assert_relative_eq!(out[1], 0.18, epsilon = 1e-3);
        assert_relative_eq!(out[2], 0.18, epsilon = 1e-3);
    }

    #[test]
    fn display_name_as_target_uses_first_view() {
        let c = Config::builtin();
        let via_display = c.processor_between(names::ACESCG, names::DISPLAY_P3_DISPLAY).unwrap();
        let via_view = c
            .compile(&DisplayViewTransform::new(names::ACESCG, names::DISPLAY_P3_DISPLAY, names::VIEW_UNTONEMAPPED).into())
            .unwrap();
        assert_eq!(via_display, via_view);
    }

    #[test]
    fn unknown_names_are_config_errors() {
        let c = Config::builtin();
        let err = c.processor_between("Nope", "ACEScg").unwrap_err();
        assert!(matches!(err, ColorError::ColorSpaceNotFound { ref name } if name == "Nope"));

        let g = GroupTransform::new().with(DisplayViewTransform::new("ACEScg", "CRT", "Film"));
        assert!(matches!(c.processor(&g), Err(ColorError::DisplayNotFound { .. })));

        let g = GroupTransform::new().with(DisplayViewTransform::new("ACEScg", names::SRGB_DISPLAY, "Film"));
        assert!(matches!(c.processor(&g), Err(ColorError::ViewNotFound { .. })));
    }

    #[test]
    fn non_finite_cdl_rejected() {
        let c = Config::builtin();
        let g = GroupTransform::new().with(CdlTransform::uniform(f32::NAN, 0.0, 1.0));
        assert!(matches!(c.processor(&g), Err(ColorError::InvalidTransform { .. })));
    }

    #[test]
    fn group_applies_in_order() {
        let c = Config::new();
        let g = GroupTransform::new()
            .with(CdlTransform::uniform(1.0, 0.25, 1.0))
            .with(MatrixTransform::diagonal([2.0, 2.0, 2.0]));
        let p = c.processor(&g).unwrap();
        let out = run(p.as_ref(), [0.25, 0.25, 0.25]);
        assert_relative_eq!(out[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn yaml_config_parses() {
        let yaml = r#"
name: studio
colorspaces:
  - name: Linear 709
    aliases: [lin709]
    primaries: rec709
  - name: Wide
    primaries:
      r: [0.708, 0.292]
      g: [0.170, 0.797]
      b: [0.131, 0.046]
      w: [0.3127, 0.3290]
    transfer: gamma 2.4
  - name: Data
    is_data: true
displays:
  - name: Monitor
    views:
      - {name: Standard, colorspace: Wide}
"#;
        let c = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(c.name(), "studio");
        assert_eq!(c.colorspaces().len(), 3);
        assert_eq!(c.colorspace("Wide").map(ColorSpace::transfer), Some(TransferFn::Gamma(2.4)));
        assert!(c.colorspace("data").is_some_and(ColorSpace::is_data));
        assert!(c.processor_between("lin709", "Monitor").is_ok());
    }

    #[test]
    fn yaml_inherits_builtin() {
        let yaml = "inherit_builtin: true\ncolorspaces:\n  - name: Extra\n    primaries: ap1\n";
        let c = Config::from_yaml_str(yaml).unwrap();
        assert!(c.colorspace("ACEScg").is_some());
        assert!(c.colorspace("Extra").is_some());
    }

    #[test]
    fn yaml_validation_errors() {
        let missing_primaries = "colorspaces:\n  - name: Foo\n";
        assert!(matches!(Config::from_yaml_str(missing_primaries), Err(ColorError::Validation(_))));

        let bad_view = "colorspaces:\n  - {name: A, is_data: true}\ndisplays:\n  - name: D\n    views:\n      - {name: V, colorspace: B}\n";
        assert!(matches!(Config::from_yaml_str(bad_view), Err(ColorError::Validation(_))));

        let dup = "colorspaces:\n  - {name: A, is_data: true}\n  - {name: B, aliases: [a], is_data: true}\n";
        assert!(matches!(Config::from_yaml_str(dup), Err(ColorError::Validation(_))));
    }

    #[test]
    fn from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "inherit_builtin: true\nname: on disk").unwrap();
        let c = Config::from_file(file.path()).unwrap();
        assert_eq!(c.name(), "on disk");

        let missing = Config::from_file("/definitely/not/here.yaml");
        assert!(matches!(missing, Err(ColorError::ConfigNotFound { .. })));
    }
}
