use thiserror::Error;

/// Rejected construction of a ray fan or charge configuration.
///
/// Only the checked constructors return this. The generator itself treats bad
/// input as a caller bug and never fails at runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ray count must be at least 1")]
    NoRays,
    #[error("ray sweep must satisfy y_min < y_max (got {y_min} .. {y_max})")]
    EmptySweep { y_min: f32, y_max: f32 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("radius range must satisfy 0 < rs_min <= rs_max (got {rs_min} .. {rs_max})")]
    BadRadiusRange { rs_min: f32, rs_max: f32 },
    #[error("growth rate must be non-negative (got {0})")]
    NegativeGrowth(f32),
}
