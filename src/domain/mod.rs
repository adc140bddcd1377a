pub mod catalog;
pub mod order;
pub mod tri_state;
pub mod work_status;

pub use catalog::*;
pub use order::*;
pub use work_status::WorkStatus;
