mod lifecycle;
mod purge;
mod reproduction;

pub use lifecycle::{feed, run_lifecycle, LifecycleSystem};
pub use purge::PurgeSystem;
pub use reproduction::{reproduce_plants, ReproductionSystem};
