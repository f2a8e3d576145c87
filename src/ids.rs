use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a [`Module`](crate::Module).
///
/// `0` marks an id that has not been assigned yet (older files carry no ids);
/// the store renumbers those on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u64);

/// Stable identifier of a [`Task`](crate::Task), unique across the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl ModuleId {
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl TaskId {
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Stored ids above this are treated like missing ones and renumbered, so
/// the allocator always has room to count upwards.
pub(crate) const ID_CEILING: u64 = u64::MAX / 2;

/// Monotonic source for both id kinds.
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn starting_after(highest: u64) -> Self {
        Self {
            next: highest.min(ID_CEILING).saturating_add(1),
        }
    }

    pub(crate) fn next_module(&mut self) -> ModuleId {
        ModuleId(self.bump())
    }

    pub(crate) fn next_task(&mut self) -> TaskId {
        TaskId(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_after(0)
    }
}
