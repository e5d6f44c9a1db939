//! Shared data structures for survey and trajectory processing
//!
//! - `Survey` / `Station`: validated (md, inc, azi) deviation survey
//! - `PositionLog`: (depth, northing, easting) computed from a survey
//! - `WellHeader`: datum, units and surface location metadata
//! - `LengthUnit`: metre/foot conversion

mod header;
mod position;
mod survey;
mod units;

pub use header::*;
pub use position::*;
pub use survey::*;
pub use units::*;
