//! Render settings file format and operations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

use grit_shaper::params::{DRIVE, MIX, OUTPUT, PARAMS, TONE};
use grit_shaper::{DistortionMode, ParamSnapshot, ShaperParams};

use crate::error::ConfigError;
use crate::validation::{self, ValidationResult};

/// Default offline render block size in frames.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Settings for one offline render.
///
/// Every field is optional in the file and falls back to the processor
/// default. Unknown keys are rejected so a typo does not silently render
/// with a default.
///
/// # TOML Format
///
/// ```toml
/// mode = "hard_clip"      # snake_case id or index 0..7
/// drive_db = 12.0
/// mix = 1.0
/// tone_hz = 20000.0
/// output_db = 0.0
/// block_size = 512
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Transfer function.
    #[serde(serialize_with = "serialize_mode", deserialize_with = "deserialize_mode")]
    pub mode: DistortionMode,

    /// Drive in dB, \[0, 24\].
    pub drive_db: f32,

    /// Dry/wet blend, \[0, 1\].
    pub mix: f32,

    /// Tone cutoff in Hz, \[1, 20000\].
    pub tone_hz: f32,

    /// Output trim in dB, \[-24, 24\].
    pub output_db: f32,

    /// Frames per processing block.
    pub block_size: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from_snapshot(&ParamSnapshot::default(), DEFAULT_BLOCK_SIZE)
    }
}

impl RenderSettings {
    /// Build settings from a parameter snapshot.
    pub fn from_snapshot(snapshot: &ParamSnapshot, block_size: usize) -> Self {
        Self {
            mode: snapshot.mode,
            drive_db: snapshot.drive_db,
            mix: snapshot.mix,
            tone_hz: snapshot.tone_hz,
            output_db: snapshot.output_db,
            block_size,
        }
    }

    /// Capture the current values of a shared parameter block.
    pub fn from_params(params: &ShaperParams) -> Self {
        Self::from_snapshot(&params.snapshot(), DEFAULT_BLOCK_SIZE)
    }

    /// Parameter values as a snapshot.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            mode: self.mode,
            drive_db: self.drive_db,
            mix: self.mix,
            tone_hz: self.tone_hz,
            output_db: self.output_db,
        }
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), mode = settings.mode.id(), "loaded render settings");
        Ok(settings)
    }

    /// Load settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "saved render settings");
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against the processor's ranges, reporting all
    /// violations at once.
    pub fn validate(&self) -> ValidationResult<()> {
        let checks = [
            (DRIVE, "drive_db", self.drive_db),
            (MIX, "mix", self.mix),
            (TONE, "tone_hz", self.tone_hz),
            (OUTPUT, "output_db", self.output_db),
        ];
        let mut errors: Vec<_> = checks
            .iter()
            .filter_map(|&(index, name, value)| {
                validation::validate_param(&PARAMS[index], name, value).err()
            })
            .collect();
        if let Err(e) = validation::validate_block_size(self.block_size) {
            errors.push(e);
        }
        validation::collect(errors)
    }

    /// Consume the settings, returning them only if every field is in range.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Push every value into a shared parameter block.
    ///
    /// The block's setters clamp, so unvalidated settings still land in
    /// range.
    pub fn apply(&self, params: &ShaperParams) {
        params.load_snapshot(&self.snapshot());
    }
}

/// Parse a mode from its snake_case id, display name or index.
///
/// ```rust
/// use grit_config::parse_mode;
/// use grit_shaper::DistortionMode;
///
/// assert_eq!(parse_mode("bit_crush").unwrap(), DistortionMode::BitCrush);
/// assert_eq!(parse_mode("3").unwrap(), DistortionMode::SoftClip1);
/// assert!(parse_mode("fuzz").is_err());
/// ```
pub fn parse_mode(s: &str) -> Result<DistortionMode, ConfigError> {
    let trimmed = s.trim();
    trimmed
        .parse::<DistortionMode>()
        .ok()
        .or_else(|| {
            DistortionMode::ALL
                .into_iter()
                .find(|m| m.name().eq_ignore_ascii_case(trimmed))
        })
        .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Index(i64),
    Id(String),
}

fn serialize_mode<S: Serializer>(mode: &DistortionMode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mode.id())
}

fn deserialize_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DistortionMode, D::Error> {
    use serde::de::Error;

    match ModeRepr::deserialize(deserializer)? {
        ModeRepr::Index(index) => usize::try_from(index)
            .ok()
            .and_then(DistortionMode::from_index)
            .ok_or_else(|| D::Error::custom(format!("mode index {index} out of range 0..=7"))),
        ModeRepr::Id(id) => parse_mode(&id).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn defaults_match_processor() {
        let settings = RenderSettings::default();
        assert_eq!(settings.mode, DistortionMode::HardClip);
        assert_eq!(settings.drive_db, 0.0);
        assert_eq!(settings.mix, 1.0);
        assert_eq!(settings.tone_hz, 20_000.0);
        assert_eq!(settings.output_db, 0.0);
        assert_eq!(settings.block_size, DEFAULT_BLOCK_SIZE);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(RenderSettings::from_toml("").unwrap(), RenderSettings::default());
    }

    #[test]
    fn mode_by_id_or_index() {
        let by_id = RenderSettings::from_toml("mode = \"saturate\"").unwrap();
        assert_eq!(by_id.mode, DistortionMode::Saturate);
        let by_index = RenderSettings::from_toml("mode = 7").unwrap();
        assert_eq!(by_index.mode, DistortionMode::BitCrush);
    }

    #[test]
    fn bad_mode_is_parse_error() {
        for text in ["mode = \"fuzz\"", "mode = 8", "mode = -1"] {
            let err = RenderSettings::from_toml(text).unwrap_err();
            assert!(matches!(err, ConfigError::TomlParse(_)), "{text}: {err}");
        }
    }

    #[test]
    fn unknown_key_rejected() {
        let err = RenderSettings::from_toml("drive = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn serializes_mode_as_id() {
        let settings = RenderSettings {
            mode: DistortionMode::SoftClip2,
            ..RenderSettings::default()
        };
        let text = settings.to_toml().unwrap();
        assert!(text.contains("mode = \"soft_clip2\""), "{text}");
        assert_eq!(RenderSettings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn validate_reports_every_violation() {
        let settings = RenderSettings {
            drive_db: 30.0,
            mix: f32::NAN,
            tone_hz: 0.0,
            block_size: 0,
            ..RenderSettings::default()
        };
        match settings.validate() {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 4),
            other => panic!("expected four errors, got {other:?}"),
        }
    }

    #[test]
    fn validate_single_violation_is_unwrapped() {
        let settings = RenderSettings {
            output_db: 30.0,
            ..RenderSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::OutOfRange { ref param, .. }) if param == "output_db"
        ));
    }

    #[test]
    fn validated_wraps_violations() {
        let settings = RenderSettings {
            block_size: 0,
            ..RenderSettings::default()
        };
        assert!(matches!(
            settings.validated(),
            Err(ConfigError::Validation(ValidationError::BlockSize(0)))
        ));
        assert_eq!(
            RenderSettings::default().validated().unwrap(),
            RenderSettings::default()
        );
    }

    #[test]
    fn apply_and_capture() {
        let settings = RenderSettings {
            mode: DistortionMode::FullWaveRectify,
            drive_db: 9.0,
            mix: 0.4,
            tone_hz: 2500.0,
            output_db: -3.0,
            block_size: 256,
        };
        let params = ShaperParams::new();
        settings.apply(&params);
        assert_eq!(params.mode(), DistortionMode::FullWaveRectify);
        assert_eq!(params.tone_hz(), 2500.0);

        let captured = RenderSettings::from_params(&params);
        assert_eq!(captured.snapshot(), settings.snapshot());
        assert_eq!(captured.block_size, DEFAULT_BLOCK_SIZE);
    }

    #[test]
    fn apply_clamps_unvalidated_values() {
        let settings = RenderSettings {
            drive_db: 100.0,
            ..RenderSettings::default()
        };
        let params = ShaperParams::new();
        settings.apply(&params);
        assert_eq!(params.drive_db(), 24.0);
    }

    #[test]
    fn parse_mode_accepts_names() {
        assert_eq!(parse_mode("hard clipping").unwrap(), DistortionMode::HardClip);
        assert_eq!(parse_mode(" soft-clip3 ").unwrap(), DistortionMode::SoftClip3);
        assert!(matches!(parse_mode("9"), Err(ConfigError::UnknownMode(_))));
    }
}
