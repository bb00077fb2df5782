//! Session events and listener delivery.
//!
//! Every successful mutation of a [`Session`](crate::session::Session)
//! produces zero or more [`ArbitrageEvent`]s. They are recorded in a bounded
//! history and delivered synchronously, together with the freshly computed
//! [`Indicators`], to every registered listener before the mutating call
//! returns.
//!
//! Budget events fire only on *transitions*, not on every recompute.

use std::collections::VecDeque;

use crate::fixed::{Fixed64, Money};
use crate::id::{LeverId, ProjectId};
use crate::indicators::Indicators;
use crate::period::{Mandate, MandatPeriod};

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArbitrageEvent {
    SelectionChanged {
        project: ProjectId,
        from: MandatPeriod,
        to: MandatPeriod,
    },
    SelectionCleared {
        /// Number of projects that were selected before the reset.
        count: usize,
    },
    LeverChanged {
        lever: LeverId,
        requested: Fixed64,
        applied: Fixed64,
    },
    /// A mandate went from within budget to over budget.
    BudgetExceeded { mandate: Mandate, overrun: Money },
    /// A mandate went from over budget back within budget.
    BudgetRestored { mandate: Mandate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SelectionChanged,
    SelectionCleared,
    LeverChanged,
    BudgetExceeded,
    BudgetRestored,
}

impl ArbitrageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ArbitrageEvent::SelectionChanged { .. } => EventKind::SelectionChanged,
            ArbitrageEvent::SelectionCleared { .. } => EventKind::SelectionCleared,
            ArbitrageEvent::LeverChanged { .. } => EventKind::LeverChanged,
            ArbitrageEvent::BudgetExceeded { .. } => EventKind::BudgetExceeded,
            ArbitrageEvent::BudgetRestored { .. } => EventKind::BudgetRestored,
        }
    }
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// A listener receives each event along with the indicators computed after
/// the mutation that produced it.
pub type Listener = Box<dyn FnMut(&ArbitrageEvent, &Indicators)>;

/// Default number of events kept in the history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Records recent events and fans them out to listeners.
pub struct EventBus {
    listeners: Vec<Listener>,
    history: VecDeque<ArbitrageEvent>,
    history_capacity: usize,
    total_emitted: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("history", &self.history)
            .field("history_capacity", &self.history_capacity)
            .field("total_emitted", &self.total_emitted)
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl EventBus {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            listeners: Vec::new(),
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
            total_emitted: 0,
        }
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Record `events` and deliver each to every listener.
    pub fn deliver(&mut self, events: &[ArbitrageEvent], indicators: &Indicators) {
        for event in events {
            if self.history_capacity > 0 {
                if self.history.len() == self.history_capacity {
                    self.history.pop_front();
                }
                self.history.push_back(event.clone());
            }
            self.total_emitted += 1;
            for listener in &mut self.listeners {
                listener(event, indicators);
            }
        }
    }

    /// Recent events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ArbitrageEvent> {
        self.history.iter()
    }

    /// Number of events emitted since creation, including those evicted
    /// from the history.
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }
}

/// Over-budget flag per mandate, indexed by [`Mandate::index`].
pub(crate) fn budget_status(indicators: &Indicators) -> [bool; 2] {
    Mandate::ALL.map(|m| indicators.mandate(m).is_over_budget())
}

/// Compare budget status before and after a mutation and produce transition events.
pub(crate) fn budget_transitions(before: [bool; 2], after: &Indicators) -> Vec<ArbitrageEvent> {
    let mut events = Vec::new();
    for mandate in Mandate::ALL {
        let was_over = before[mandate.index()];
        let now = after.mandate(mandate);
        match (was_over, now.is_over_budget()) {
            (false, true) => events.push(ArbitrageEvent::BudgetExceeded {
                mandate,
                overrun: now.overrun,
            }),
            (true, false) => events.push(ArbitrageEvent::BudgetRestored { mandate }),
            _ => {}
        }
    }
    events
}
