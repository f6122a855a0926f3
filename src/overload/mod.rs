pub mod dispatch;
pub mod rank;

pub use dispatch::emit_dispatch;
pub use rank::{DispatchMode, MAX_OVERLOAD, RankError, rank};
