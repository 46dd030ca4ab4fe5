//! Shared CLI helpers used across multiple commands.

use grit_shaper::DistortionMode;

/// Parse a mode id, display name or index for clap's `value_parser`.
pub fn parse_mode_arg(s: &str) -> Result<DistortionMode, String> {
    grit_config::parse_mode(s).map_err(|e| format!("{e} (run `grit modes` for the list)"))
}

/// Parse an output bit depth for clap's `value_parser`.
pub fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.trim().parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

/// Root-mean-square level.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

/// Largest absolute sample.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_depths() {
        assert_eq!(parse_bit_depth("24"), Ok(24));
        assert!(parse_bit_depth("8").is_err());
        assert!(parse_bit_depth("abc").is_err());
    }

    #[test]
    fn mode_arg() {
        assert_eq!(parse_mode_arg("saturate"), Ok(DistortionMode::Saturate));
        let err = parse_mode_arg("fuzz").unwrap_err();
        assert!(err.contains("grit modes"), "{err}");
    }

    #[test]
    fn levels() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[0.5, -0.5, 0.5, -0.5]) - 0.5).abs() < 1e-7);
        assert_eq!(peak(&[0.1, -0.7, 0.3]), 0.7);
    }
}
