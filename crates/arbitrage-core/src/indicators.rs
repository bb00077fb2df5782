//! Derived budget indicators.
//!
//! [`compute_indicators`] is a pure function of the selection, the catalog
//! and the financing model. Nothing here is stored; callers recompute after
//! every mutation.
//!
//! A project scheduled as [`MandatPeriod::Spread`] weighs on *both* mandate
//! budgets at full cost, but is counted once in the grand total.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::financing::FinancingModel;
use crate::fixed::{Fixed64, Money, excess, percentage_of};
use crate::period::{Mandate, MandatPeriod};
use crate::selection::SelectionState;

/// Budget figures for a single mandate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MandateIndicators {
    pub mandate: Mandate,
    /// Sum of the cost of every project touching this mandate.
    pub committed: Money,
    pub available: Money,
    /// `max(0, committed - available)`.
    pub overrun: Money,
    /// `max(0, available - committed)`.
    pub surplus: Money,
    /// Overrun as a percentage of capacity, saturating at [`Fixed64::MAX`].
    /// `None` when capacity is zero.
    pub overrun_pct: Option<Fixed64>,
    pub project_count: usize,
}

impl MandateIndicators {
    fn new(mandate: Mandate, committed: Money, available: Money, project_count: usize) -> Self {
        let overrun = excess(committed, available);
        let overrun_pct = percentage_of(overrun, available);
        Self {
            mandate,
            committed,
            available,
            overrun,
            surplus: excess(available, committed),
            overrun_pct,
            project_count,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.overrun > Money::ZERO
    }
}

/// Projects scheduled across both mandates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpreadBreakdown {
    /// Cost of spread projects, each counted once.
    pub cost: Money,
    pub count: usize,
    pub projects: Vec<String>,
}

/// Snapshot of every derived figure for one selection and lever setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicators {
    pub mandates: [MandateIndicators; 2],
    /// Sum of the cost of each selected project, counted exactly once.
    pub grand_total: Money,
    pub total_capacity: Money,
    pub total_overrun: Money,
    pub total_surplus: Money,
    pub selected_count: usize,
    /// Keys of selected projects, in catalog order.
    pub selected: Vec<String>,
    pub spread: SpreadBreakdown,
    /// Daily ridership of selected projects with a known impact.
    pub total_impact: u64,
}

impl Indicators {
    pub fn mandate(&self, mandate: Mandate) -> &MandateIndicators {
        &self.mandates[mandate.index()]
    }

    pub fn committed(&self, mandate: Mandate) -> Money {
        self.mandate(mandate).committed
    }

    pub fn overrun(&self, mandate: Mandate) -> Money {
        self.mandate(mandate).overrun
    }

    /// `true` when no mandate is over budget.
    pub fn is_balanced(&self) -> bool {
        self.mandates.iter().all(|m| !m.is_over_budget())
    }
}

/// Derive every indicator from the current state. Has no side effects.
pub fn compute_indicators(
    selection: &SelectionState,
    catalog: &Catalog,
    financing: &FinancingModel,
) -> Indicators {
    let mut committed = [Money::ZERO; 2];
    let mut counts = [0usize; 2];
    let mut grand_total = Money::ZERO;
    let mut selected = Vec::new();
    let mut spread = SpreadBreakdown::default();
    let mut total_impact: u64 = 0;

    for (id, period) in selection.assigned() {
        let Some(project) = catalog.get(id) else {
            continue;
        };

        for mandate in period.mandates() {
            let i = mandate.index();
            committed[i] = committed[i].saturating_add(project.cost);
            counts[i] += 1;
        }
        grand_total = grand_total.saturating_add(project.cost);
        total_impact += u64::from(project.impact.unwrap_or(0));
        selected.push(project.key.clone());

        if period == MandatPeriod::Spread {
            spread.cost = spread.cost.saturating_add(project.cost);
            spread.count += 1;
            spread.projects.push(project.key.clone());
        }
    }

    let mandates = Mandate::ALL.map(|m| {
        MandateIndicators::new(
            m,
            committed[m.index()],
            financing.available_capacity(m),
            counts[m.index()],
        )
    });
    let total_capacity = financing.total_capacity();

    Indicators {
        mandates,
        grand_total,
        total_capacity,
        total_overrun: excess(grand_total, total_capacity),
        total_surplus: excess(total_capacity, grand_total),
        selected_count: selected.len(),
        selected,
        spread,
        total_impact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn select(
        state: &mut SelectionState,
        catalog: &Catalog,
        key: &str,
        period: MandatPeriod,
    ) {
        let id = catalog.project_id(key).unwrap();
        state.set(catalog, id, period).unwrap();
    }

    #[test]
    fn empty_selection_has_no_commitment() {
        let catalog = sample_catalog();
        let financing = flat_financing(700.0, 700.0);
        let ind = compute_indicators(&SelectionState::new(&catalog), &catalog, &financing);

        assert_eq!(ind.grand_total, Money::ZERO);
        for m in Mandate::ALL {
            assert_eq!(ind.committed(m), Money::ZERO);
            assert_eq!(ind.overrun(m), Money::ZERO);
            assert_eq!(ind.mandate(m).surplus, money(700.0));
        }
        assert_eq!(ind.selected_count, 0);
        assert!(ind.selected.is_empty());
        assert!(ind.is_balanced());
    }

    #[test]
    fn reference_scenario() {
        let catalog = sample_catalog();
        let financing = flat_financing(700.0, 700.0);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "a", MandatPeriod::First);
        select(&mut state, &catalog, "b", MandatPeriod::Spread);

        let ind = compute_indicators(&state, &catalog, &financing);
        assert_eq!(ind.committed(Mandate::First), money(800.0));
        assert_eq!(ind.committed(Mandate::Second), money(300.0));
        assert_eq!(ind.grand_total, money(800.0));
        assert_eq!(ind.overrun(Mandate::First), money(100.0));
        assert_eq!(ind.overrun(Mandate::Second), Money::ZERO);
        assert_eq!(ind.mandate(Mandate::Second).surplus, money(400.0));
        assert!(!ind.is_balanced());
        assert_eq!(ind.selected, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ind.mandate(Mandate::First).project_count, 2);
        assert_eq!(ind.mandate(Mandate::Second).project_count, 1);
    }

    #[test]
    fn spread_counts_twice_per_mandate_once_in_total() {
        let catalog = sample_catalog();
        let financing = flat_financing(1000.0, 1000.0);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "b", MandatPeriod::Spread);

        let ind = compute_indicators(&state, &catalog, &financing);
        assert_eq!(ind.committed(Mandate::First), money(300.0));
        assert_eq!(ind.committed(Mandate::Second), money(300.0));
        assert_eq!(ind.grand_total, money(300.0));
        assert_eq!(ind.spread.cost, money(300.0));
        assert_eq!(ind.spread.count, 1);
        assert_eq!(ind.spread.projects, vec!["b".to_string()]);
    }

    #[test]
    fn overrun_percentage() {
        let catalog = sample_catalog();
        let financing = flat_financing(400.0, 400.0);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "a", MandatPeriod::First);

        let ind = compute_indicators(&state, &catalog, &financing);
        // 100 over a capacity of 400.
        assert_eq!(ind.mandate(Mandate::First).overrun_pct, Some(money(25.0)));
        assert_eq!(ind.mandate(Mandate::Second).overrun_pct, Some(Money::ZERO));
    }

    #[test]
    fn overrun_percentage_undefined_without_capacity() {
        let catalog = sample_catalog();
        let financing = flat_financing(0.0, 0.0);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "a", MandatPeriod::Second);

        let ind = compute_indicators(&state, &catalog, &financing);
        let second = ind.mandate(Mandate::Second);
        assert_eq!(second.overrun, money(500.0));
        assert_eq!(second.overrun_pct, None);
        assert_eq!(ind.mandate(Mandate::First).overrun_pct, None);
    }

    #[test]
    fn overrun_percentage_saturates_on_tiny_capacity() {
        let catalog = sample_catalog();
        let financing = flat_financing(0.00001, 0.00001);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "a", MandatPeriod::First);

        let ind = compute_indicators(&state, &catalog, &financing);
        let first = ind.mandate(Mandate::First);
        assert!(first.available > Money::ZERO);
        assert!(first.is_over_budget());
        assert_eq!(first.overrun_pct, Some(Fixed64::MAX));
        assert_eq!(ind.mandate(Mandate::Second).overrun_pct, Some(Money::ZERO));
    }

    #[test]
    fn totals_compare_grand_total_with_total_capacity() {
        let catalog = sample_catalog();
        let financing = flat_financing(300.0, 200.0);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "a", MandatPeriod::First);
        select(&mut state, &catalog, "b", MandatPeriod::Spread);

        let ind = compute_indicators(&state, &catalog, &financing);
        assert_eq!(ind.total_capacity, money(500.0));
        assert_eq!(ind.total_overrun, money(300.0));
        assert_eq!(ind.total_surplus, Money::ZERO);
    }

    #[test]
    fn impact_sums_known_ridership() {
        let catalog = sample_catalog();
        let financing = flat_financing(1000.0, 1000.0);
        let mut state = SelectionState::new(&catalog);
        select(&mut state, &catalog, "a", MandatPeriod::First);
        select(&mut state, &catalog, "b", MandatPeriod::Spread);

        let ind = compute_indicators(&state, &catalog, &financing);
        // "a" carries 40_000 riders a day, "b" has no estimate.
        assert_eq!(ind.total_impact, 40_000);
    }
}
