use anyhow::{Context, Result};
use flock_core::SimulationConfig;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a JSON simulation config. Missing fields take their defaults.
pub fn read_config<R: Read>(reader: R) -> Result<SimulationConfig> {
    let config: SimulationConfig =
        serde_json::from_reader(reader).context("Failed to parse simulation config")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;
    read_config(BufReader::new(file))
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Merges an optional config file with arena overrides from the command line
/// and validates the result.
pub fn resolve_config(
    path: Option<&Path>,
    width: Option<f32>,
    height: Option<f32>,
) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(width) = width {
        config.arena.width = width;
    }
    if let Some(height) = height {
        config.arena.height = height;
    }

    config.validate().context("Rejected simulation config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "arena": { "width": 1024, "height": 768 }, "steering": { "max_speed": 3.5 } }"#;

        let config = read_config(json.as_bytes()).unwrap();

        assert_eq!(config.arena.width, 1024.0);
        assert_eq!(config.steering.max_speed, 3.5);
        assert_eq!(config.steering.max_force, 0.1);
        assert_eq!(config.steering.avoidance_radius, 20.0);
    }

    #[test]
    fn test_partial_arena_uses_defaults() {
        let config = read_config(r#"{ "arena": { "width": 1024 } }"#.as_bytes()).unwrap();

        assert_eq!(config.arena.width, 1024.0);
        assert_eq!(config.arena.height, 600.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        assert!(read_config("{ not json".as_bytes()).is_err());
    }

    #[test]
    fn test_overrides_are_validated() {
        let config = resolve_config(None, Some(640.0), None).unwrap();
        assert_eq!(config.arena.width, 640.0);
        assert_eq!(config.arena.height, 600.0);

        let err = resolve_config(None, Some(0.0), None).unwrap_err();
        assert!(format!("{:#}", err).contains("arena"));
    }

    #[test]
    fn test_missing_file() {
        let err = resolve_config(Some(Path::new("/nonexistent/flock.json")), None, None)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open config file"));
    }
}
