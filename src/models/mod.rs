pub mod group;
pub mod response;
pub mod section;

pub use group::*;
pub use response::*;
pub use section::*;
