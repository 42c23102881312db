use thiserror::Error;

use crate::core_modules::region_validator::RegionVerdict;

// Screening-level failures. Either a complete result is produced and
// persisted, or one of these halts the run with nothing written.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("No patient name supplied; analysis was not started.")]
    InputMissing,
    #[error("Measurement region rejected ({0})")]
    RegionInvalid(EyeRejections),
}

/// The per-eye rejection reasons behind a `RegionInvalid` failure.
/// `None` means that eye's measurement region passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeRejections {
    pub left: Option<RegionVerdict>,
    pub right: Option<RegionVerdict>,
}

impl std::fmt::Display for EyeRejections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        if let Some(verdict) = self.left {
            write!(f, "left eye: {}", verdict.description())?;
            first = false;
        }
        if let Some(verdict) = self.right {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "right eye: {}", verdict.description())?;
        }
        Ok(())
    }
}

// Region extraction failures, produced before validation ever runs.
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Selected region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },
    #[error(
        "Selected region {width}x{height} at ({x}, {y}) exceeds the {image_width}x{image_height} photograph"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("Frame buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}

// Record store failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to open record file: {0}")]
    Open(std::io::Error),
    #[error("Failed to append record: {0}")]
    Append(std::io::Error),
    #[error("Failed to read records: {0}")]
    Read(std::io::Error),
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("The record store has shut down.")]
    StoreClosed,
}
