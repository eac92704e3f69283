//! CLI command implementations

pub mod bake;
pub mod bench;
pub mod grade;
pub mod spaces;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use camgrade_color::Config;
use camgrade_core::{BgrFrame, ColorSpaces, ColorTransformParams, DisplayTarget, Size};
use camgrade_lut::BlueAxis;
use camgrade_pipeline::GradeMode;

/// Grade controls shared by `grade`, `bake` and `bench`.
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// Warm (+) / cool (-) shift, -1..1
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub temperature: f32,

    /// Green (+) / magenta (-) shift, -1..1
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub tint: f32,

    /// Exposure gain, 0..4 (multiplied by the gain scale)
    #[arg(long, default_value_t = 1.0)]
    pub gain: f32,

    /// CDL slope
    #[arg(long, default_value_t = 1.0)]
    pub slope: f32,

    /// CDL power
    #[arg(long, default_value_t = 1.0)]
    pub power: f32,

    /// CDL offset
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub offset: f32,

    /// Slider positions "temp,tint,gain" (0..200, 0..200, 0..400); overrides
    /// temperature, tint and gain
    #[arg(long, value_parser = parse_trackbar)]
    pub trackbar: Option<[i32; 3]>,
}

impl ParamArgs {
    /// Parameter snapshot for these arguments.
    pub fn params(&self) -> ColorTransformParams {
        let base = match self.trackbar {
            Some([t, n, g]) => ColorTransformParams::from_trackbar(t, n, g),
            None => ColorTransformParams::default()
                .with_temperature(self.temperature)
                .with_tint(self.tint)
                .with_gain(self.gain),
        };
        base.with_cdl(self.slope, self.power, self.offset)
    }
}

/// Color config and space selection.
#[derive(Args, Debug, Clone, Default)]
pub struct SpaceArgs {
    /// Color config YAML (built-in config when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Camera input color space
    #[arg(long = "input-space")]
    pub input_space: Option<String>,

    /// Working color space the grade runs in
    #[arg(long = "working-space")]
    pub working_space: Option<String>,

    /// Display name, or a display color space when no view is given
    #[arg(long)]
    pub display: Option<String>,

    /// View of the display
    #[arg(long, requires = "display")]
    pub view: Option<String>,
}

impl SpaceArgs {
    /// Loads the color config.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load color config: {}", path.display())),
            None => Ok(Config::builtin()),
        }
    }

    /// Applies the overrides on top of `spaces`.
    pub fn apply(&self, mut spaces: ColorSpaces) -> ColorSpaces {
        if let Some(input) = &self.input_space {
            spaces.input = input.clone();
        }
        if let Some(working) = &self.working_space {
            spaces.working = working.clone();
        }
        match (&self.display, &self.view) {
            (Some(display), Some(view)) => spaces.display = DisplayTarget::view(display, view),
            (Some(display), None) => spaces.display = DisplayTarget::space(display),
            _ => {}
        }
        spaces
    }
}

/// `--mode` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Bake a LUT atlas and sample it
    Atlas,
    /// Evaluate the transform per pixel
    Direct,
}

impl From<ModeArg> for GradeMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Atlas => GradeMode::Atlas,
            ModeArg::Direct => GradeMode::Direct,
        }
    }
}

/// `--blue-axis` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AxisArg {
    /// Nearest lower blue tile
    Floor,
    /// Blend the two nearest blue tiles
    Linear,
}

impl From<AxisArg> for BlueAxis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::Floor => BlueAxis::Floor,
            AxisArg::Linear => BlueAxis::Linear,
        }
    }
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse::<usize>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h.trim().parse::<usize>().map_err(|e| format!("bad height '{h}': {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("size must be non-zero, got {width}x{height}"));
    }
    Ok(Size::new(width, height))
}

/// Parses `temp,tint,gain` slider positions.
fn parse_trackbar(s: &str) -> Result<[i32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 values (temp,tint,gain), got {}", parts.len()));
    }
    let mut out = [0i32; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|e| format!("bad value '{part}': {e}"))?;
    }
    Ok(out)
}

/// Loads an image as a BGR frame.
pub fn load_frame(path: &Path) -> Result<BgrFrame> {
    let rgb = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut data = rgb.into_raw();
    for px in data.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    Ok(BgrFrame::from_vec(width, height, data)?)
}

/// Writes a BGR frame as an RGB image.
pub fn save_frame(path: &Path, frame: &BgrFrame) -> Result<()> {
    if frame.is_empty() {
        bail!("Nothing to save: frame is empty");
    }
    let mut data = frame.as_bytes().to_vec();
    for px in data.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    let img = image::RgbImage::from_raw(frame.width() as u32, frame.height() as u32, data)
        .context("Frame buffer does not match its size")?;
    img.save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(parse_size("1920x1080"), Ok(Size::new(1920, 1080)));
        assert_eq!(parse_size("64X48"), Ok(Size::new(64, 48)));
        assert!(parse_size("1920").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn trackbar_values() {
        assert_eq!(parse_trackbar("100, 100,100"), Ok([100, 100, 100]));
        assert!(parse_trackbar("1,2").is_err());
        assert!(parse_trackbar("a,b,c").is_err());
    }

    #[test]
    fn trackbar_overrides_sliders() {
        let args = ParamArgs {
            temperature: 0.9,
            tint: 0.0,
            gain: 3.0,
            slope: 1.0,
            power: 1.0,
            offset: 0.0,
            trackbar: Some([150, 100, 200]),
        };
        let p = args.params();
        assert_eq!(p.temperature, 0.5);
        assert_eq!(p.gain, 2.0);
    }

    #[test]
    fn space_overrides() {
        let args = SpaceArgs {
            working_space: Some("Linear Rec.2020".into()),
            display: Some("Display P3 - Display".into()),
            ..Default::default()
        };
        let s = args.apply(ColorSpaces::default());
        assert_eq!(s.input, ColorSpaces::default().input);
        assert_eq!(s.working, "Linear Rec.2020");
        assert_eq!(s.display, DisplayTarget::space("Display P3 - Display"));
    }

    #[test]
    fn frame_roundtrip_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let frame = BgrFrame::from_fn(5, 3, |x, y| [x as u8 * 10, y as u8 * 20, 200]);
        save_frame(&path, &frame).unwrap();
        assert_eq!(load_frame(&path).unwrap(), frame);
    }
}
