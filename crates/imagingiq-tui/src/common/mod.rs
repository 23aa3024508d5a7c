pub mod flag;
pub mod task;
pub mod text;

pub use flag::{ClosePolicy, TransientFlag};
pub use task::{TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
