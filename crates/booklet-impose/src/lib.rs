pub mod constants;
pub mod geometry;
pub mod impose;
pub mod layout;
mod options;
mod plan;
mod render;
mod stats;
mod types;

pub use impose::{impose, impose_booklet, load_pdf, save_pdf};
pub use layout::{JobDescriptor, PlacementRecord, SignatureLayout};
pub use options::*;
pub use plan::{Plan, SignaturePair, choose_best_plan, plan_for_pair};
pub use render::render_job;
pub use stats::{JobStatistics, job_statistics};
pub use types::*;
