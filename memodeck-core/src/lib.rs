pub mod errors;
pub mod filters;
pub mod mastery;
pub mod models;
pub mod progression;
pub mod repo;
pub mod scheduler;
pub mod stats;

pub use errors::*;
pub use filters::*;
pub use mastery::*;
pub use models::*;
pub use progression::*;
pub use repo::*;
pub use scheduler::*;
pub use stats::*;
