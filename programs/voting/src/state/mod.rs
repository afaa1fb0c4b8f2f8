pub mod candidate;
pub mod poll;

pub use candidate::*;
pub use poll::*;
