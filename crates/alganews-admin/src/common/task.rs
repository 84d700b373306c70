/// Identifier of one issued request or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Monotonic task id source (stored in `AdminState`).
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Latest issued task of one kind (mutated only by the reducer).
///
/// Starting a new task supersedes the previous one, so a late result of an
/// older task no longer matches and is discarded.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Issues a fresh id and makes it the only one accepted.
    pub fn begin(&mut self, seq: &mut TaskSeq) -> TaskId {
        let id = seq.next_id();
        self.active = Some(id);
        id
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
