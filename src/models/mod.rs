//! Simulation domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `TaskSpec` | Input descriptor (name, arrival, duration, priority) |
//! | `Task` | Runtime process state (aged priority, progress, completion) |
//! | `Processor` | Idle sentinel or a task handle |
//! | `TickRecord` | Per-tick observation (running task, waiting set) |
//! | `AgingNote` | One priority transition |

mod record;
mod task;

pub use record::{AgingNote, TickRecord};
pub use task::{
    aged_priority, Advance, Processor, Task, TaskId, TaskSpec, IDLE_PRIORITY,
    IDLE_TASK_NAME,
};
