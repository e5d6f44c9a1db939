//! wellpath: wellbore trajectory computation
//!
//! Turns directional surveys (measured depth, inclination, azimuth) into
//! spatial position logs and back.
//!
//! ## Architecture
//!
//! - **Geometry**: direction vectors, angles, quaternion rotation
//! - **Trajectory**: minimum curvature, radius of curvature and tangential
//!   position methods; arc resampling; deviation reconstruction; datum shifts
//! - **Interpolate**: regular-step linear interpolation of raw arrays
//! - **CSV / Config**: flat file import/export and TOML settings for the CLI

pub mod checks;
pub mod config;
pub mod csv_io;
pub mod geometry;
pub mod interpolate;
pub mod trajectory;
pub mod types;

// Re-export configuration
pub use config::WellpathConfig;

// Re-export commonly used types
pub use types::{
    Datum, DepthReference, LengthUnit, Method, PositionLog, Station, Survey, TangentialMethod,
    WellHeader,
};

// Re-export trajectory operations
pub use trajectory::{
    build_survey, minimum_curvature, radius_of_curvature, reconstruct_deviation, resample,
    tangential, to_tvdss, to_wellhead, to_zero, TrajectoryError,
};

pub use checks::ValidationError;
pub use interpolate::{interpolate_deviation, interpolate_position, PositionSamples};
