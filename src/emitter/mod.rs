pub mod target;

pub use target::{EmitterConfig, Target};
