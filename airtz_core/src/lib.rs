pub mod entity;
pub mod results;
pub mod vocab;

pub use entity::*;
pub use results::*;
pub use vocab::*;
