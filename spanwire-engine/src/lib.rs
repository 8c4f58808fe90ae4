pub mod config;
pub mod engine;
pub mod runtime;

// Re-export the runtime entry point so frontends can simply do:
pub use engine::{Mirror, MirrorStats, PipelineError, Step};
pub use runtime::run_live;
