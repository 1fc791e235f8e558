// Core algorithm exports
pub mod allocator;
pub mod jitter;
pub mod scoring;

pub use allocator::{Allocator, AllocationError};
pub use jitter::jittered_score;
pub use scoring::Scorer;
