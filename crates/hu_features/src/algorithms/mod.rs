pub mod preprocessing;
pub mod extraction;
pub mod simplification;
pub mod selection;

pub use preprocessing::*;
pub use extraction::*;
pub use simplification::*;
pub use selection::*;
