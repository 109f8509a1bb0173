pub mod fixed;
pub mod pattern;
pub mod select;

pub use fixed::*;
pub use pattern::*;
pub use select::*;
