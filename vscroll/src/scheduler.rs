use alloc::vec::Vec;

/// Deferred work the engine posts to itself.
///
/// Tasks carry the sequence/generation they belong to; a task whose owner was cancelled or
/// replaced in the meantime is ignored when it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameTask {
    MomentumPoll { sequence: u64 },
    AnimationStep { generation: u64 },
}

/// A delayed-callback queue synchronized to the host's display frames.
///
/// Tasks become due at `due_ms` and run on the first frame at or after it, in posting order.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    pending: Vec<(u64, FrameTask)>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_delayed(&mut self, task: FrameTask, now_ms: u64, delay_ms: u64) {
        let due = now_ms.saturating_add(delay_ms);
        vtrace!(?task, due, "post frame task");
        self.pending.push((due, task));
    }

    /// Posts `task` for the next frame.
    pub fn post_on_animation(&mut self, task: FrameTask, now_ms: u64) {
        self.post_delayed(task, now_ms, 0);
    }

    /// Removes and returns every task due at `now_ms`, oldest first.
    ///
    /// Tasks posted while the returned batch runs wait for a later frame.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<FrameTask> {
        let mut due = Vec::new();
        self.pending.retain(|&(at, task)| {
            if at <= now_ms {
                due.push(task);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|&(at, _)| at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
