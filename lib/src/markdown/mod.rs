mod plugin;
mod markdown;
mod auto_heading;
mod highlight;

pub use plugin::*;
pub use markdown::*;
pub use auto_heading::*;
pub use highlight::*;
