mod error;
mod mirror;

pub use self::{
    error::PipelineError,
    mirror::{Mirror, MirrorStats, Step},
};
