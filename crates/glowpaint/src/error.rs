//! Error types for the painting core.
//!
//! Only startup and external-input failures surface as errors. Numeric
//! trouble inside the simulation is absorbed where it happens.

pub type StudioResult<T> = Result<T, StudioError>;

#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("surface must be at least 1x1, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("unknown pen: {0:?}")]
    UnknownPen(String),

    #[error("trace buffer length {len} is not a multiple of 3")]
    MalformedTrace { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_readable() {
        let e = StudioError::EmptySurface { width: 0, height: 10 };
        assert_eq!(e.to_string(), "surface must be at least 1x1, got 0x10");
        assert!(StudioError::UnknownPen("x".into()).to_string().contains("unknown pen"));
        assert!(StudioError::MalformedTrace { len: 4 }.to_string().contains("4"));
    }

    #[test]
    fn settings_error_converts() {
        let err: StudioError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid settings:"));
    }
}
