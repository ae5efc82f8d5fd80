mod document;
mod layout;
mod page;
mod context;
mod listing;
mod site;

pub use document::*;
pub use layout::*;
pub use page::*;
pub use context::*;
pub use site::*;
