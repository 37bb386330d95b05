pub mod level;
pub mod reading;
pub mod stats;

pub use level::*;
pub use reading::*;
pub use stats::*;
