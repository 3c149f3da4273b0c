//! Renderer adapter
//!
//! Boundary between placement records and lopdf. Everything above this
//! module works on page counts and geometry only.

mod sheet;
mod xobject;

pub use sheet::render_job;
