//! The explicit state object of one user's arbitrage session.
//!
//! A [`Session`] owns the immutable catalog, the mutable selection and
//! financing settings, and the event bus. All mutation goes through its
//! methods. Each successful mutation recomputes the indicators and delivers
//! the resulting events before returning, so listeners never observe a
//! selection and indicators that disagree.
//!
//! Sessions are not shared: a host serving several users keeps one session
//! per user and serializes calls on each.

use log::{debug, warn};

use crate::catalog::{Catalog, Project};
use crate::event::{ArbitrageEvent, EventBus, Listener, budget_status, budget_transitions};
use crate::financing::{FinancingError, FinancingModel, LeverUpdate, LeverView};
use crate::fixed::{Fixed64, Money};
use crate::indicators::{Indicators, compute_indicators};
use crate::period::{Mandate, MandatPeriod};
use crate::selection::{SelectionError, SelectionState};

#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    selection: SelectionState,
    financing: FinancingModel,
    events: EventBus,
    /// Whether each mandate was over budget after the last mutation.
    over_budget: [bool; 2],
}

impl Session {
    pub fn new(catalog: Catalog, financing: FinancingModel) -> Self {
        Self::with_event_bus(catalog, financing, EventBus::default())
    }

    pub fn with_event_bus(catalog: Catalog, financing: FinancingModel, events: EventBus) -> Self {
        let selection = SelectionState::new(&catalog);
        let over_budget = budget_status(&compute_indicators(&selection, &catalog, &financing));
        Self {
            catalog,
            selection,
            financing,
            events,
            over_budget,
        }
    }

    // -- Catalog --

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn projects(&self) -> &[Project] {
        self.catalog.projects()
    }

    pub fn find_project(&self, key: &str) -> Option<&Project> {
        self.catalog.find(key)
    }

    // -- Selection --

    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    /// Current period of the project with the given key.
    pub fn selection(&self, key: &str) -> Result<MandatPeriod, SelectionError> {
        self.catalog
            .project_id(key)
            .map(|id| self.selection.get(id))
            .ok_or_else(|| SelectionError::NotFound(key.to_string()))
    }

    /// Schedule a project. Requests outside the project's selectable set, or
    /// for unknown keys, are rejected and leave the session untouched.
    pub fn set_project_period(
        &mut self,
        key: &str,
        period: MandatPeriod,
    ) -> Result<(), SelectionError> {
        let Some(id) = self.catalog.project_id(key) else {
            warn!("set_project_period: no such project {key}");
            return Err(SelectionError::NotFound(key.to_string()));
        };
        let previous = self
            .selection
            .set(&self.catalog, id, period)
            .inspect_err(|e| warn!("set_project_period rejected: {e}"))?;

        if previous == period {
            return Ok(());
        }
        debug!("project {key}: {previous} -> {period}");
        self.commit(vec![ArbitrageEvent::SelectionChanged {
            project: id,
            from: previous,
            to: period,
        }]);
        Ok(())
    }

    /// Reset every project to unassigned.
    pub fn clear_all(&mut self) {
        let count = self.selection.clear_all();
        debug!("cleared {count} selections");
        if count > 0 {
            self.commit(vec![ArbitrageEvent::SelectionCleared { count }]);
        }
    }

    // -- Financing --

    pub fn financing(&self) -> &FinancingModel {
        &self.financing
    }

    pub fn levers(&self) -> impl Iterator<Item = LeverView<'_>> {
        self.financing.levers()
    }

    /// Set a lever by name, clamping the value to the lever's domain.
    pub fn set_lever(&mut self, name: &str, value: Fixed64) -> Result<LeverUpdate, FinancingError> {
        let update = self.financing.set_lever(name, value)?;
        if update.changed() {
            self.commit(vec![ArbitrageEvent::LeverChanged {
                lever: update.lever,
                requested: update.requested,
                applied: update.applied,
            }]);
        }
        Ok(update)
    }

    /// Restore every lever to its default value.
    pub fn reset_levers(&mut self) {
        let before: Vec<Fixed64> = self.financing.levers().map(|l| l.value).collect();
        self.financing.reset_levers();
        let events = self
            .financing
            .levers()
            .zip(before)
            .filter(|(lever, old)| lever.value != *old)
            .map(|(lever, _)| ArbitrageEvent::LeverChanged {
                lever: lever.id,
                requested: lever.def.default,
                applied: lever.value,
            })
            .collect::<Vec<_>>();
        if !events.is_empty() {
            self.commit(events);
        }
    }

    pub fn available_capacity(&self, mandate: Mandate) -> Money {
        self.financing.available_capacity(mandate)
    }

    // -- Indicators & events --

    /// Indicators for the current state, computed fresh.
    pub fn indicators(&self) -> Indicators {
        compute_indicators(&self.selection, &self.catalog, &self.financing)
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.events.subscribe(listener);
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Recompute indicators, append budget transitions and deliver.
    fn commit(&mut self, mut events: Vec<ArbitrageEvent>) {
        let indicators = self.indicators();
        events.extend(budget_transitions(self.over_budget, &indicators));
        self.over_budget = budget_status(&indicators);
        self.events.deliver(&events, &indicators);
    }
}
