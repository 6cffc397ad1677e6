//! Per-notification lifecycle.
//!
//! A notification moves through these phases strictly in order. Transitions
//! are looked up in one table so a stray trigger (a late animation completion,
//! a second close) is recognised and dropped instead of corrupting state.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting in the admission queue.
    Queued,
    /// Picked for admission, element created but not inserted.
    BeforeOpen,
    /// Inserted and running its enter animation.
    Opening,
    /// Visible, expiry clock running.
    Settled,
    /// Running its exit animation.
    Closing,
    Removed,
    /// Suppressed by a `before_open` handler.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Admit,
    OpenVetoed,
    Inserted,
    /// Did not fit in a pooled instance and went back to the queue.
    Overflowed,
    OpenFinished,
    CloseRequested,
    CloseFinished,
}

impl Phase {
    /// The phase `trigger` leads to, or `None` if it does not apply here.
    pub fn on(self, trigger: Trigger) -> Option<Phase> {
        use Phase::*;
        use Trigger::*;

        let next = match (self, trigger) {
            (Queued, Admit) => BeforeOpen,
            (BeforeOpen, OpenVetoed) => Halted,
            (BeforeOpen, Inserted) => Opening,
            (BeforeOpen, Overflowed) => Queued,
            (Opening, OpenFinished) => Settled,
            (Opening | Settled, CloseRequested) => Closing,
            (Closing, CloseFinished) => Removed,
            _ => {
                tracing::trace!("Ignoring {:?} in phase {:?}", trigger, self);
                return None;
            }
        };
        Some(next)
    }

    /// Whether the element occupies space in the rendered sequence.
    pub fn is_rendered(self) -> bool {
        matches!(self, Phase::Opening | Phase::Settled | Phase::Closing)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
