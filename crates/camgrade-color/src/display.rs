//! Displays and their views.
//!
//! A [`Display`] is an output device; each [`View`] names the color space
//! the working image is converted into for that device. The first view is
//! the default.
//!
//! ```
//! use camgrade_color::{Display, View};
//!
//! let mut display = Display::new("sRGB - Display");
//! display.add_view(View::new("Un-tone-mapped", "sRGB - Display"));
//! display.add_view(View::new("Raw", "Raw"));
//!
//! assert_eq!(display.default_view().map(View::name), Some("Un-tone-mapped"));
//! ```

use serde::Deserialize;

/// A view within a display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct View {
    name: String,
    colorspace: String,
}

impl View {
    /// Creates a view targeting `colorspace`.
    pub fn new(name: impl Into<String>, colorspace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colorspace: colorspace.into(),
        }
    }

    /// View name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target color space name.
    #[inline]
    pub fn colorspace(&self) -> &str {
        &self.colorspace
    }
}

/// An output display with ordered views.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Display {
    name: String,
    #[serde(default)]
    views: Vec<View>,
}

impl Display {
    /// Creates a display with no views.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            views: Vec::new(),
        }
    }

    /// Adds a view, replacing one with the same name.
    pub fn add_view(&mut self, view: View) {
        if let Some(existing) = self.views.iter_mut().find(|v| v.name == view.name) {
            *existing = view;
        } else {
            self.views.push(view);
        }
    }

    /// Builder form of [`add_view`](Self::add_view).
    pub fn with_view(mut self, view: View) -> Self {
        self.add_view(view);
        self
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All views in declaration order.
    #[inline]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Finds a view by name, ignoring ASCII case.
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// First declared view.
    pub fn default_view(&self) -> Option<&View> {
        self.views.first()
    }

    /// Iterates view names.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|v| v.name.as_str())
    }
}
