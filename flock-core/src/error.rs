use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by the steering engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An arithmetic precondition was violated, e.g. dividing a vector by zero.
    InvalidOperation(&'static str),
    /// Construction arguments were rejected.
    Configuration(ConfigError),
}

/// Reasons a simulation configuration is rejected at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidArena { width: f32, height: f32 },
    InvalidMaxSpeed(f32),
    InvalidMaxForce(f32),
    InvalidRadius { name: &'static str, value: f32 },
    InvalidWallMargin(f32),
    AvoidanceRadiusTooLarge { avoidance: f32, separation: f32 },
    CapacityExceeded { capacity: usize, requested: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOperation(what) => write!(f, "invalid operation: {what}"),
            Error::Configuration(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArena { width, height } => write!(
                f,
                "arena must have positive, finite width and height (got {width}x{height})"
            ),
            ConfigError::InvalidMaxSpeed(value) => {
                write!(f, "max_speed must be positive and finite (got {value})")
            }
            ConfigError::InvalidMaxForce(value) => {
                write!(f, "max_force must be positive and finite (got {value})")
            }
            ConfigError::InvalidRadius { name, value } => {
                write!(f, "{name} must be positive and finite (got {value})")
            }
            ConfigError::InvalidWallMargin(value) => {
                write!(f, "wall_margin must be non-negative and finite (got {value})")
            }
            ConfigError::AvoidanceRadiusTooLarge {
                avoidance,
                separation,
            } => write!(
                f,
                "avoidance_radius ({avoidance}) must be smaller than separation_radius ({separation})"
            ),
            ConfigError::CapacityExceeded {
                capacity,
                requested,
            } => write!(
                f,
                "flock capacity is {capacity} agents, {requested} requested"
            ),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Configuration(err) => Some(err),
            Error::InvalidOperation(_) => None,
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Configuration(err)
    }
}
