//! Color primaries, white points and RGB-XYZ matrix generation.
//!
//! Each RGB space is defined by the CIE xy chromaticities of its three
//! primaries and its white point. Conversion between two spaces goes through
//! XYZ, with Bradford adaptation when the white points differ.

use glam::Vec3;
use serde::Deserialize;

use crate::Mat3;

/// RGB color space primaries definition.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f32, f32),
    /// Green primary (x, y) chromaticity
    pub g: (f32, f32),
    /// Blue primary (x, y) chromaticity
    pub b: (f32, f32),
    /// White point (x, y) chromaticity
    pub w: (f32, f32),
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }

    /// Looks up a standard set by short name.
    ///
    /// Accepts `rec709`/`srgb`, `rec2020`, `p3_d65`/`display_p3`,
    /// `aces_ap0`/`ap0` and `aces_ap1`/`ap1`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', ' ', '.'], "_").as_str() {
            "rec709" | "rec_709" | "srgb" | "bt709" => Some(REC709),
            "rec2020" | "rec_2020" | "bt2020" => Some(REC2020),
            "p3_d65" | "display_p3" | "p3d65" => Some(P3_D65),
            "aces_ap0" | "ap0" => Some(ACES_AP0),
            "aces_ap1" | "ap1" => Some(ACES_AP1),
            _ => None,
        }
    }
}

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// ACES white point chromaticity (~D60).
pub const ACES_WHITE_XY: (f32, f32) = (0.32168, 0.33767);

/// sRGB / Rec.709 primaries.
pub const REC709: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
};

/// Rec.2020 primaries.
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
};

/// P3 primaries with a D65 white point.
pub const P3_D65: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
};

/// ACES AP0 primaries (ACES2065-1).
pub const ACES_AP0: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0000, 1.0000),
    b: (0.0001, -0.0770),
    w: ACES_WHITE_XY,
};

/// ACES AP1 primaries (ACEScg).
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: ACES_WHITE_XY,
};

/// Bradford cone response matrix.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// ```rust
/// use camgrade_color::primaries::{REC709, rgb_to_xyz_matrix};
/// use glam::Vec3;
///
/// let white = rgb_to_xyz_matrix(&REC709) * Vec3::ONE;
/// assert!((white.y - 1.0).abs() < 1e-3);
/// ```
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);
    let w_xyz = primaries.white_xyz();

    // Scale each primary column so that RGB (1,1,1) lands on the white point
    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * w_xyz;

    Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix for a set of primaries.
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

/// Bradford adaptation between two XYZ white points.
pub fn bradford_matrix(src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let inv = BRADFORD.inverse().unwrap_or(Mat3::IDENTITY);
    let src = BRADFORD * src_white;
    let dst = BRADFORD * dst_white;
    let scale = Mat3::diagonal(dst.x / src.x, dst.y / src.y, dst.z / src.z);
    inv * scale * BRADFORD
}

/// Linear RGB to linear RGB conversion, white-adapted when needed.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Mat3 {
    let to_xyz = rgb_to_xyz_matrix(src);
    let from_xyz = xyz_to_rgb_matrix(dst);
    if src.w == dst.w {
        from_xyz * to_xyz
    } else {
        from_xyz * bradford_matrix(src.white_xyz(), dst.white_xyz()) * to_xyz
    }
}
