pub mod calendar;
pub mod plan;
pub mod step;

pub use calendar::*;
pub use plan::*;
pub use step::*;
