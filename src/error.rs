use std::fmt;

/// Rejected wave tuning. Raised before any wave is generated.
#[derive(Debug)]
pub enum ConfigError {
    ZeroMinEnemies,
    MaxBelowMin { min: usize, max: usize },
    EmptyPatternList,
    PlayfieldTooSmall { width: f32, height: f32 },
    BadSpeedStep { step: f32 },
    ZeroFireIntervalFloor,
    FireFloorAboveBase { floor_ms: u64, base_ms: u64 },
    ZeroFireRamp,
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMinEnemies => write!(f, "min_enemies must be at least 1"),
            Self::MaxBelowMin { min, max } => {
                write!(f, "max_enemies ({max}) is below min_enemies ({min})")
            }
            Self::EmptyPatternList => write!(f, "formation pattern list is empty"),
            Self::PlayfieldTooSmall { width, height } => {
                write!(f, "playfield {width}x{height} cannot hold the player and an enemy")
            }
            Self::BadSpeedStep { step } => {
                write!(f, "speed_step must be finite and non-negative (got {step})")
            }
            Self::ZeroFireIntervalFloor => write!(f, "min_fire_interval_ms must be non-zero"),
            Self::FireFloorAboveBase { floor_ms, base_ms } => write!(
                f,
                "min_fire_interval_ms ({floor_ms}) exceeds base_fire_interval_ms ({base_ms})"
            ),
            Self::ZeroFireRamp => write!(f, "fire_ramp_every must be at least 1"),
            Self::Io(e) => write!(f, "failed to read tuning: {e}"),
            Self::Parse(e) => write!(f, "invalid tuning json: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Score persistence failure. Never fatal to gameplay.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Corrupt(serde_json::Error),
    UnsupportedVersion { found: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "score store i/o error: {e}"),
            Self::Corrupt(e) => write!(f, "score file is corrupt: {e}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported score file version: {found}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupt(e) => Some(e),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e)
    }
}
