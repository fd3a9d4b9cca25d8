//! Per-chatroom admission control for simulated replies.
//!
//! A [`ThrottleGate`] is a three-state machine: `Idle` accepts a
//! submission and moves to `AwaitingReply`; delivering the reply moves to
//! `Cooldown`; after the cooldown timer the gate returns to `Idle`.  The
//! gate itself holds no timers — the command layer drives transitions and
//! owns the scheduled tasks, so the machine stays trivially testable.

use tracing::warn;

/// Gate state.  At most one simulated reply may be in flight per gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Accepting submissions.
    #[default]
    Idle,
    /// A user message was admitted; its simulated reply is pending.
    AwaitingReply,
    /// The reply landed; new submissions are refused until the cooldown
    /// elapses.
    Cooldown,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThrottleGate {
    state: GateState,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether a submission would currently be admitted.
    pub fn is_idle(&self) -> bool {
        self.state == GateState::Idle
    }

    /// Try to admit a submission.  Returns `true` and moves to
    /// `AwaitingReply` only from `Idle`; otherwise the submission is
    /// refused and nothing changes.
    pub fn try_admit(&mut self) -> bool {
        if self.state == GateState::Idle {
            self.state = GateState::AwaitingReply;
            true
        } else {
            false
        }
    }

    /// The pending reply was appended: start the cooldown window.
    pub fn reply_delivered(&mut self) {
        if self.state == GateState::AwaitingReply {
            self.state = GateState::Cooldown;
        } else {
            warn!(state = ?self.state, "reply_delivered outside AwaitingReply ignored");
        }
    }

    /// The cooldown timer fired: accept submissions again.
    pub fn cooldown_elapsed(&mut self) {
        if self.state == GateState::Cooldown {
            self.state = GateState::Idle;
        } else {
            warn!(state = ?self.state, "cooldown_elapsed outside Cooldown ignored");
        }
    }

    /// Teardown: the conversation went away (room deleted, session
    /// switched) and any pending reply was cancelled.  Valid from any
    /// state.
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut gate = ThrottleGate::new();
        assert_eq!(gate.state(), GateState::Idle);

        assert!(gate.try_admit());
        assert_eq!(gate.state(), GateState::AwaitingReply);

        gate.reply_delivered();
        assert_eq!(gate.state(), GateState::Cooldown);

        gate.cooldown_elapsed();
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_second_admit_refused_while_awaiting() {
        let mut gate = ThrottleGate::new();
        assert!(gate.try_admit());

        assert!(!gate.try_admit());
        assert_eq!(gate.state(), GateState::AwaitingReply);
    }

    #[test]
    fn test_admit_refused_during_cooldown() {
        let mut gate = ThrottleGate::new();
        gate.try_admit();
        gate.reply_delivered();

        assert!(!gate.try_admit());
        assert_eq!(gate.state(), GateState::Cooldown);
    }

    #[test]
    fn test_stray_transitions_do_not_change_state() {
        let mut gate = ThrottleGate::new();

        gate.reply_delivered();
        assert_eq!(gate.state(), GateState::Idle);

        gate.cooldown_elapsed();
        assert_eq!(gate.state(), GateState::Idle);

        gate.try_admit();
        gate.cooldown_elapsed();
        assert_eq!(gate.state(), GateState::AwaitingReply);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut gate = ThrottleGate::new();
        gate.try_admit();
        gate.reset();
        assert!(gate.is_idle());

        gate.try_admit();
        gate.reply_delivered();
        gate.reset();
        assert!(gate.is_idle());
    }
}
