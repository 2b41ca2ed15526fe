pub mod crowding;
pub mod genome;
pub mod mutation;
pub mod pareto;
pub mod runner;

pub use self::genome::Genome;
pub use self::runner::{
    OptimizationOptions, OptimizationResult, Optimizer, Phase, ProgressCallback, Silent,
};
