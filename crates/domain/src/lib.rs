#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod exercise;
mod pool;
mod presenter;
mod sampler;
mod saved_workout;
mod service;

pub use catalog::*;
pub use error::*;
pub use exercise::*;
pub use pool::*;
pub use presenter::*;
pub use sampler::*;
pub use saved_workout::*;
pub use service::*;
