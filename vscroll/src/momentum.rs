/// What started a settle sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettleOrigin {
    /// The finger lifted after a drag. Motion is already visible, so one quiet poll settles.
    DragRelease,
    /// A fling was just issued. The first poll counts as active so two quiet polls are needed.
    Fling,
}

impl SettleOrigin {
    pub fn starts_active(self) -> bool {
        matches!(self, Self::Fling)
    }
}

/// Per-sequence bookkeeping. Dropped when the sequence settles or is cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentumPollState {
    pub sequence: u64,
    pub last_scroll_was_active: bool,
    pub snapping_in_progress: bool,
}

/// Outcome of one poll tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollDecision {
    /// Position still moving; poll again after the delay.
    KeepPolling,
    /// Paging is on and no snap was issued yet: snap now, then poll again.
    Snap,
    /// Motion stopped. The sequence is over.
    Settled,
}

/// Decides when post-touch motion has settled.
///
/// The machine is `Idle` when no [`MomentumPollState`] is held and `Settling` otherwise. It does
/// not schedule anything itself: the engine posts a poll task carrying the sequence number and
/// feeds each tick back through [`MomentumEventStateMachine::poll`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MomentumEventStateMachine {
    active: Option<MomentumPollState>,
    next_sequence: u64,
}

impl MomentumEventStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_settling(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&MomentumPollState> {
        self.active.as_ref()
    }

    /// Opens a sequence. Returns `None` while another sequence is running, which collapses a
    /// touch-up and a fling for the same gesture into one sequence.
    pub fn begin(&mut self) -> Option<u64> {
        if self.active.is_some() {
            return None;
        }
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let sequence = self.next_sequence;
        self.active = Some(MomentumPollState {
            sequence,
            last_scroll_was_active: false,
            snapping_in_progress: false,
        });
        vdebug!(sequence, "momentum sequence begin");
        Some(sequence)
    }

    /// Runs one tick. `actively_scrolling` is whether any position change was observed since
    /// the previous tick. Returns `None` for ticks of a cancelled or finished sequence.
    pub fn poll(
        &mut self,
        sequence: u64,
        actively_scrolling: bool,
        paging_enabled: bool,
    ) -> Option<PollDecision> {
        let state = self.active.as_mut().filter(|s| s.sequence == sequence)?;
        state.last_scroll_was_active = actively_scrolling;

        if actively_scrolling {
            return Some(PollDecision::KeepPolling);
        }
        if paging_enabled && !state.snapping_in_progress {
            state.snapping_in_progress = true;
            return Some(PollDecision::Snap);
        }

        self.active = None;
        vdebug!(sequence, "momentum sequence settled");
        Some(PollDecision::Settled)
    }

    /// Drops the current sequence; its pending tick becomes a no-op.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }
}
