mod delete;
mod get;
mod lifecycle;
mod post;
mod update;

pub use delete::*;
pub use get::*;
pub use lifecycle::*;
pub use post::*;
pub use update::*;
