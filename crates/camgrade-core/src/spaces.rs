//! Input / working / display color space triplet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the working image is sent for display.
///
/// In YAML either a plain string (a color space name) or a mapping with
/// `display` and `view` keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayTarget {
    /// A named display color space.
    Space(String),
    /// A display/view pair.
    View {
        /// Display name (e.g. "sRGB - Display").
        display: String,
        /// View name (e.g. "Un-tone-mapped").
        view: String,
    },
}

impl DisplayTarget {
    /// Creates a display/view target.
    pub fn view(display: impl Into<String>, view: impl Into<String>) -> Self {
        Self::View {
            display: display.into(),
            view: view.into(),
        }
    }

    /// Creates a plain color space target.
    pub fn space(name: impl Into<String>) -> Self {
        Self::Space(name.into())
    }
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(name) => f.write_str(name),
            Self::View { display, view } => write!(f, "{display} / {view}"),
        }
    }
}

/// The fixed color space triplet of a pipeline.
///
/// ```rust
/// use camgrade_core::{ColorSpaces, DisplayTarget};
///
/// let spaces = ColorSpaces::default();
/// assert_eq!(spaces.working, "ACEScg");
/// assert!(matches!(spaces.display, DisplayTarget::View { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSpaces {
    /// Camera encoding.
    pub input: String,
    /// Space the grade is applied in.
    pub working: String,
    /// Output target.
    pub display: DisplayTarget,
}

impl Default for ColorSpaces {
    fn default() -> Self {
        Self {
            input: "sRGB Encoded Rec.709 (sRGB)".into(),
            working: "ACEScg".into(),
            display: DisplayTarget::view("sRGB - Display", "Un-tone-mapped"),
        }
    }
}

impl ColorSpaces {
    /// Creates a triplet.
    pub fn new(input: impl Into<String>, working: impl Into<String>, display: DisplayTarget) -> Self {
        Self {
            input: input.into(),
            working: working.into(),
            display,
        }
    }

    /// The same space for input, working and display.
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            input: name.clone(),
            working: name.clone(),
            display: DisplayTarget::Space(name),
        }
    }
}

impl fmt::Display for ColorSpaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} -> {}", self.input, self.working, self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_plain_display() {
        let s: ColorSpaces =
            serde_yaml::from_str("input: Raw\nworking: ACEScg\ndisplay: sRGB - Display\n").unwrap();
        assert_eq!(s.display, DisplayTarget::space("sRGB - Display"));
    }

    #[test]
    fn yaml_view_display() {
        let yaml = "input: Raw\nworking: ACEScg\ndisplay:\n  display: sRGB - Display\n  view: Raw\n";
        let s: ColorSpaces = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(s.display, DisplayTarget::view("sRGB - Display", "Raw"));
    }

    #[test]
    fn uniform_matches_everywhere() {
        let s = ColorSpaces::uniform("Raw");
        assert_eq!(s.input, "Raw");
        assert_eq!(s.working, "Raw");
        assert_eq!(s.to_string(), "Raw -> Raw -> Raw");
    }
}
