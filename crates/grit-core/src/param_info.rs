//! Parameter introspection for discoverable processor parameters.
//!
//! [`ParameterInfo`] lets a host layer, a config loader or a CLI enumerate a
//! processor's parameters, read their ranges and set them by index without
//! knowing the concrete type.
//!
//! Each parameter is described by a [`ParamDescriptor`] carrying:
//!
//! - [`ParamId`] - stable numeric ID for automation and persisted state
//! - `string_id` - human-readable stable ID (`"grit_drive"`)
//! - [`ParamScale`] - control taper (linear or logarithmic)
//! - [`ParamFlags`] - capability flags (automatable, stepped)
//!
//! # Example
//!
//! ```rust
//! use grit_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     trim_db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Output", "Out", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(4), "trim_output")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.trim_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.trim_db = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { trim_db: 0.0 };
//! trim.set_param(0, 40.0);
//! assert_eq!(trim.get_param(0), 24.0);
//! assert_eq!(trim.find_param("trim_output"), Some(0));
//! ```

use core::fmt;

/// Control taper of a parameter's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values; used for frequencies.
    Logarithmic,
}

impl ParamScale {
    /// Short label for tables.
    pub const fn label(self) -> &'static str {
        match self {
            ParamScale::Linear => "lin",
            ParamScale::Logarithmic => "log",
        }
    }
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter:
/// persisted host state refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags. Use [`union`](Self::union) to combine.
///
/// ```rust
/// use grit_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter takes integer values only (enum-like).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are addressed by zero-based index, stable for the lifetime of
/// the processor. Implementations clamp in [`set_param`](Self::set_param)
/// and ignore out-of-range indices.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (0.0 when out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name, short name or string ID
    /// (case-insensitive).
    fn find_param(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }
}

/// Metadata for one parameter: display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Drive").
    pub name: &'static str,

    /// Short name for small displays, 8 characters or fewer.
    pub short_name: &'static str,

    /// Unit used when formatting the value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value on construction.
    pub default: f32,

    /// Recommended increment for encoder-style control.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Human-readable stable ID, `"crate_param"` convention.
    pub string_id: &'static str,

    /// Control taper.
    pub scale: ParamScale,

    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Gain parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Frequency parameter in Hz with logarithmic scaling.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Dry/wet blend as a fraction: 0.0 = dry, 1.0 = wet.
    pub const fn mix(default: f32) -> Self {
        Self {
            name: "Mix",
            short_name: "Mix",
            unit: ParamUnit::Fraction,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Enum-like selector with `count` integer choices `0..count`.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        count: u32,
        default: u32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: (count.saturating_sub(1)) as f32,
            default: default as f32,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Whether `value` lies inside `[min, max]` (false for NaN).
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps a value to this parameter's range.
    ///
    /// Stepped parameters are also rounded to the nearest integer. NaN maps
    /// to the default.
    ///
    /// ```rust
    /// use grit_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Drive", "Drive", 0.0, 24.0, 0.0);
    /// assert_eq!(desc.clamp(30.0), 24.0);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.flags.contains(ParamFlags::STEPPED) {
            libm::roundf(clamped)
        } else {
            clamped
        }
    }

    /// Formats `value` with this parameter's unit, without allocating.
    ///
    /// ```rust
    /// use grit_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Drive", "Drive", 0.0, 24.0, 0.0);
    /// assert_eq!(desc.display(12.0).to_string(), "12.0 dB");
    /// ```
    pub fn display(&self, value: f32) -> ParamValueDisplay {
        ParamValueDisplay {
            value,
            unit: self.unit,
        }
    }
}

/// A parameter value paired with its unit, implementing [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct ParamValueDisplay {
    value: f32,
    unit: ParamUnit,
}

impl fmt::Display for ParamValueDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            ParamUnit::Decibels => write!(f, "{:.1}{}", self.value, self.unit.suffix()),
            ParamUnit::Hertz => write!(f, "{:.0}{}", self.value, self.unit.suffix()),
            ParamUnit::Fraction => write!(f, "{:.2}", self.value),
            ParamUnit::None => write!(f, "{:.0}", self.value),
        }
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for drive and output trim.
    Decibels,
    /// Hertz, for the tone cutoff.
    Hertz,
    /// Dimensionless fraction in \[0, 1\], for mix.
    Fraction,
    /// No unit, for selectors.
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    ///
    /// ```rust
    /// use grit_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Fraction | ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestShaper {
        drive: f32,
        mode: f32,
    }

    impl ParameterInfo for TestShaper {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::gain_db("Drive", "Drive", 0.0, 24.0, 0.0)
                        .with_id(ParamId(1), "test_drive"),
                ),
                1 => Some(ParamDescriptor::choice("Mode", "Mode", 8, 2).with_id(ParamId(0), "test_mode")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.drive,
                1 => self.mode,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            let Some(desc) = self.param_info(index) else {
                return;
            };
            match index {
                0 => self.drive = desc.clamp(value),
                1 => self.mode = desc.clamp(value),
                _ => {}
            }
        }
    }

    #[test]
    fn set_param_clamps() {
        let mut shaper = TestShaper { drive: 0.0, mode: 2.0 };
        shaper.set_param(0, 100.0);
        assert_eq!(shaper.get_param(0), 24.0);
        shaper.set_param(1, 6.6);
        assert_eq!(shaper.get_param(1), 7.0);
        shaper.set_param(1, -3.0);
        assert_eq!(shaper.get_param(1), 0.0);
    }

    #[test]
    fn out_of_bounds_index_is_ignored() {
        let mut shaper = TestShaper { drive: 3.0, mode: 2.0 };
        shaper.set_param(9, 1.0);
        assert_eq!(shaper.get_param(9), 0.0);
        assert_eq!(shaper.get_param(0), 3.0);
        assert!(shaper.param_info(2).is_none());
    }

    #[test]
    fn lookup_by_name_or_string_id() {
        let shaper = TestShaper { drive: 0.0, mode: 0.0 };
        assert_eq!(shaper.find_param("drive"), Some(0));
        assert_eq!(shaper.find_param("TEST_MODE"), Some(1));
        assert_eq!(shaper.find_param("tone"), None);
    }

    #[test]
    fn choice_descriptor_is_stepped() {
        let desc = ParamDescriptor::choice("Mode", "Mode", 8, 2);
        assert_eq!(desc.max, 7.0);
        assert_eq!(desc.default, 2.0);
        assert!(desc.flags.contains(ParamFlags::STEPPED));
        assert!(desc.flags.contains(ParamFlags::AUTOMATABLE));
    }

    #[test]
    fn clamp_handles_nan() {
        let desc = ParamDescriptor::mix(1.0);
        assert_eq!(desc.clamp(f32::NAN), 1.0);
        assert_eq!(desc.clamp(f32::INFINITY), 1.0);
        assert_eq!(desc.clamp(f32::NEG_INFINITY), 0.0);
        assert!(!desc.contains(f32::NAN));
        assert!(desc.contains(0.5));
    }

    #[test]
    fn constructors_pick_taper() {
        let tone = ParamDescriptor::frequency_hz("Tone", "Tone", 1.0, 20000.0, 20000.0);
        assert_eq!(tone.scale, ParamScale::Logarithmic);
        assert_eq!(tone.scale.label(), "log");
        assert_eq!(ParamDescriptor::mix(1.0).scale.label(), "lin");
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_formats_units() {
        assert_eq!(
            ParamDescriptor::frequency_hz("Tone", "Tone", 1.0, 20000.0, 20000.0)
                .display(1234.4)
                .to_string(),
            "1234 Hz"
        );
        assert_eq!(ParamDescriptor::mix(1.0).display(0.5).to_string(), "0.50");
        assert_eq!(ParamDescriptor::choice("Mode", "Mode", 8, 2).display(3.0).to_string(), "3");
    }
}
