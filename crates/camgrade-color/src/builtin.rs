//! Built-in configuration.
//!
//! Covers the camera, working and display spaces a live grading setup needs
//! without loading any file.
//!
//! # Example
//!
//! ```
//! use camgrade_color::builtin;
//!
//! let config = builtin::config();
//! assert!(config.colorspace("ACEScg").is_some());
//! assert!(config.display("sRGB - Display").is_some());
//! ```

use crate::colorspace::ColorSpace;
use crate::config::Config;
use crate::display::{Display, View};
use crate::primaries::{ACES_AP0, ACES_AP1, P3_D65, REC709, REC2020};
use crate::transfer::TransferFn;

/// Names of the built-in spaces, displays and views.
pub mod names {
    /// sRGB-encoded Rec.709 camera footage.
    pub const SRGB_ENCODED_REC709: &str = "sRGB Encoded Rec.709 (sRGB)";
    /// Scene-linear Rec.709.
    pub const LINEAR_REC709: &str = "Linear Rec.709 (sRGB)";
    /// ACES AP1 linear working space.
    pub const ACESCG: &str = "ACEScg";
    /// ACES AP0 linear interchange space.
    pub const ACES2065_1: &str = "ACES2065-1";
    /// Scene-linear Rec.2020.
    pub const LINEAR_REC2020: &str = "Linear Rec.2020";
    /// Scene-linear P3 with D65 white.
    pub const LINEAR_P3_D65: &str = "Linear P3-D65";
    /// Rec.709 display with a pure 2.2 power.
    pub const GAMMA22_REC709_DISPLAY: &str = "Gamma 2.2 Rec.709 - Display";
    /// sRGB display encoding.
    pub const SRGB_DISPLAY: &str = "sRGB - Display";
    /// Display P3 encoding.
    pub const DISPLAY_P3_DISPLAY: &str = "Display P3 - Display";
    /// Non-color data.
    pub const RAW: &str = "Raw";
    /// Direct conversion view.
    pub const VIEW_UNTONEMAPPED: &str = "Un-tone-mapped";
    /// Pass-through view.
    pub const VIEW_RAW: &str = "Raw";
}

/// Builds the built-in configuration.
pub fn config() -> Config {
    let mut config = Config::new();
    config.set_name("camgrade builtin");

    for cs in colorspaces() {
        config.add_colorspace(cs);
    }

    config.add_display(
        Display::new(names::SRGB_DISPLAY)
            .with_view(View::new(names::VIEW_UNTONEMAPPED, names::SRGB_DISPLAY))
            .with_view(View::new(names::VIEW_RAW, names::RAW)),
    );
    config.add_display(
        Display::new(names::DISPLAY_P3_DISPLAY)
            .with_view(View::new(names::VIEW_UNTONEMAPPED, names::DISPLAY_P3_DISPLAY))
            .with_view(View::new(names::VIEW_RAW, names::RAW)),
    );

    config
}

fn colorspaces() -> Vec<ColorSpace> {
    vec![
        ColorSpace::builder(names::SRGB_ENCODED_REC709)
            .alias("srgb_encoded_rec709")
            .alias("srgb_tx")
            .alias("sRGB")
            .description("sRGB transfer over Rec.709 primaries, typical webcam output")
            .primaries(REC709)
            .transfer(TransferFn::Srgb)
            .build(),
        ColorSpace::builder(names::LINEAR_REC709)
            .alias("lin_rec709_srgb")
            .alias("lin_rec709")
            .primaries(REC709)
            .build(),
        ColorSpace::builder(names::ACESCG)
            .alias("ACES - ACEScg")
            .alias("lin_ap1")
            .description("ACES AP1 scene-linear working space")
            .primaries(ACES_AP1)
            .build(),
        ColorSpace::builder(names::ACES2065_1)
            .alias("ACES - ACES2065-1")
            .alias("lin_ap0")
            .primaries(ACES_AP0)
            .build(),
        ColorSpace::builder(names::LINEAR_REC2020)
            .alias("lin_rec2020")
            .primaries(REC2020)
            .build(),
        ColorSpace::builder(names::LINEAR_P3_D65)
            .alias("lin_p3d65")
            .primaries(P3_D65)
            .build(),
        ColorSpace::builder(names::GAMMA22_REC709_DISPLAY)
            .alias("g22_rec709_display")
            .primaries(REC709)
            .transfer(TransferFn::Gamma(2.2))
            .build(),
        ColorSpace::builder(names::SRGB_DISPLAY)
            .alias("srgb_display")
            .primaries(REC709)
            .transfer(TransferFn::Srgb)
            .build(),
        ColorSpace::builder(names::DISPLAY_P3_DISPLAY)
            .alias("displayp3_display")
            .primaries(P3_D65)
            .transfer(TransferFn::Srgb)
            .build(),
        ColorSpace::builder(names::RAW)
            .alias("Utility - Raw")
            .description("Non-color data, never converted")
            .is_data(true)
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_validates() {
        config().validate().unwrap();
    }

    #[test]
    fn all_names_resolve() {
        let c = config();
        for name in [
            names::SRGB_ENCODED_REC709,
            names::LINEAR_REC709,
            names::ACESCG,
            names::ACES2065_1,
            names::LINEAR_REC2020,
            names::LINEAR_P3_D65,
            names::GAMMA22_REC709_DISPLAY,
            names::SRGB_DISPLAY,
            names::DISPLAY_P3_DISPLAY,
            names::RAW,
        ] {
            assert!(c.colorspace(name).is_some(), "{name}");
        }
    }

    #[test]
    fn displays_have_two_views() {
        let c = config();
        for d in c.displays() {
            let views: Vec<_> = d.view_names().collect();
            assert_eq!(views, [names::VIEW_UNTONEMAPPED, names::VIEW_RAW]);
        }
    }
}
