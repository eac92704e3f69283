//! Named color space definitions.
//!
//! A color space here is fully described by its primaries, white point and
//! transfer encoding. Data spaces (`is_data`) carry no colorimetry and are
//! never converted.
//!
//! # Example
//!
//! ```
//! use camgrade_color::{ColorSpace, TransferFn, primaries};
//!
//! let cs = ColorSpace::builder("ACEScg")
//!     .alias("aces_cg")
//!     .primaries(primaries::ACES_AP1)
//!     .transfer(TransferFn::Linear)
//!     .build();
//!
//! assert!(cs.matches_name("ACESCG"));
//! assert!(cs.matches_name("aces_cg"));
//! ```

use crate::primaries::Primaries;
use crate::transfer::TransferFn;

/// A named color space.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpace {
    name: String,
    aliases: Vec<String>,
    description: String,
    primaries: Option<Primaries>,
    transfer: TransferFn,
    is_data: bool,
}

impl ColorSpace {
    /// Creates a data color space with no colorimetry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            primaries: None,
            transfer: TransferFn::Linear,
            is_data: true,
        }
    }

    /// Starts a builder.
    pub fn builder(name: impl Into<String>) -> ColorSpaceBuilder {
        ColorSpaceBuilder::new(name)
    }

    /// Space name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative names.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Free-form description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Primaries and white point, `None` for data spaces.
    #[inline]
    pub fn primaries(&self) -> Option<&Primaries> {
        self.primaries.as_ref()
    }

    /// Transfer encoding.
    #[inline]
    pub fn transfer(&self) -> TransferFn {
        self.transfer
    }

    /// True for non-color data.
    #[inline]
    pub fn is_data(&self) -> bool {
        self.is_data || self.primaries.is_none()
    }

    /// Checks if a name or alias matches, ignoring ASCII case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Builder for [`ColorSpace`].
#[derive(Debug)]
pub struct ColorSpaceBuilder {
    inner: ColorSpace,
}

impl ColorSpaceBuilder {
    /// Creates a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: ColorSpace::new(name),
        }
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.aliases.push(alias.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = desc.into();
        self
    }

    /// Sets primaries, which also marks the space as a color space.
    pub fn primaries(mut self, primaries: Primaries) -> Self {
        self.inner.primaries = Some(primaries);
        self.inner.is_data = false;
        self
    }

    /// Sets the transfer encoding.
    pub fn transfer(mut self, transfer: TransferFn) -> Self {
        self.inner.transfer = transfer;
        self
    }

    /// Forces the data flag.
    pub fn is_data(mut self, is_data: bool) -> Self {
        self.inner.is_data = is_data;
        self
    }

    /// Builds the color space.
    pub fn build(self) -> ColorSpace {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primaries::REC709;

    #[test]
    fn new_is_data() {
        let raw = ColorSpace::new("Raw");
        assert!(raw.is_data());
        assert!(raw.primaries().is_none());
    }

    #[test]
    fn builder_with_primaries_is_color() {
        let cs = ColorSpace::builder("sRGB")
            .primaries(REC709)
            .transfer(TransferFn::Srgb)
            .build();
        assert!(!cs.is_data());
        assert_eq!(cs.transfer(), TransferFn::Srgb);
    }

    #[test]
    fn forced_data_overrides_primaries() {
        let cs = ColorSpace::builder("Normals").primaries(REC709).is_data(true).build();
        assert!(cs.is_data());
    }
}
