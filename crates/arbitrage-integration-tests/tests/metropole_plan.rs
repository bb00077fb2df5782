//! Integration test: planning against the shipped metropole scenario.
//!
//! Loads `data/metropole` through the data crate, then drives a session the
//! way a planning UI would: schedule projects, watch budgets go over, pull
//! financing levers until the plan fits again.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use arbitrage_core::catalog::TransportMode;
use arbitrage_core::event::{ArbitrageEvent, EventKind};
use arbitrage_core::fixed::Money;
use arbitrage_core::period::{Mandate, MandatPeriod};
use arbitrage_core::selection::SelectionError;
use arbitrage_core::session::Session;
use arbitrage_core::test_utils::money;
use arbitrage_data::{Scenario, load_scenario};

fn scenario() -> Scenario {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/metropole");
    load_scenario(&dir).expect("shipped scenario loads")
}

/// Metro E spread over both mandates, two trams and a BHNS line.
fn base_plan(session: &mut Session) {
    for (key, period) in [
        ("metro_e", MandatPeriod::Spread),
        ("tram_t8", MandatPeriod::First),
        ("tram_t9", MandatPeriod::Second),
        ("bhns_c3", MandatPeriod::First),
    ] {
        session.set_project_period(key, period).unwrap();
    }
}

#[test]
fn shipped_scenario_contents() {
    let scenario = scenario();
    assert_eq!(scenario.catalog.len(), 13);
    assert_eq!(scenario.financing.lever_count(), 5);

    let metro = scenario.catalog.find("metro_e").unwrap();
    assert_eq!(metro.mode, TransportMode::Metro);
    assert_eq!(metro.mandat_only, Some(MandatPeriod::Spread));
    assert_eq!(metro.cost, money(2100.0));

    // 2500 envelope + 500 borrowing + 0.25 * 1200 state + 0.125 * 480 region
    assert_eq!(
        scenario.financing.available_capacity(Mandate::First),
        money(3360.0)
    );
    assert_eq!(
        scenario.financing.available_capacity(Mandate::Second),
        money(3300.0)
    );
}

#[test]
fn catalog_order_follows_data_file() {
    let scenario = scenario();
    let first_keys: Vec<&str> = scenario
        .catalog
        .projects()
        .iter()
        .take(3)
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(first_keys, ["metro_e", "metro_b_ext", "metro_a_auto"]);
}

#[test]
fn constrained_projects_refuse_single_mandate() {
    let mut session = scenario().new_session();
    let constrained: Vec<String> = session
        .projects()
        .iter()
        .filter(|p| p.mandat_only == Some(MandatPeriod::Spread))
        .map(|p| p.key.clone())
        .collect();
    assert_eq!(constrained.len(), 3);

    for key in &constrained {
        for period in [MandatPeriod::First, MandatPeriod::Second] {
            assert!(matches!(
                session.set_project_period(key, period),
                Err(SelectionError::InvalidAssignment { .. })
            ));
        }
        session
            .set_project_period(key, MandatPeriod::Spread)
            .unwrap();
    }
    assert_eq!(session.indicators().spread.count, 3);
}

#[test]
fn balanced_base_plan() {
    let mut session = scenario().new_session();
    base_plan(&mut session);

    let ind = session.indicators();
    assert_eq!(ind.committed(Mandate::First), money(2490.0));
    assert_eq!(ind.committed(Mandate::Second), money(2310.0));
    assert_eq!(ind.grand_total, money(2700.0));
    assert_eq!(ind.mandate(Mandate::First).surplus, money(870.0));
    assert_eq!(ind.total_impact, 240_000);
    assert!(ind.is_balanced());
}

#[test]
fn ambitious_plan_overruns_then_levers_rebalance() {
    let mut session = scenario().new_session();
    base_plan(&mut session);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    session.subscribe(Box::new(move |e, _| sink.borrow_mut().push(e.clone())));

    session
        .set_project_period("metro_a_auto", MandatPeriod::Spread)
        .unwrap();
    session
        .set_project_period("tram_tel", MandatPeriod::Spread)
        .unwrap();

    let ind = session.indicators();
    assert_eq!(ind.overrun(Mandate::First), money(780.0));
    assert_eq!(ind.overrun(Mandate::Second), money(660.0));
    // Each spread project is paid once overall, so the plan fits the total.
    assert_eq!(ind.grand_total, money(4350.0));
    assert_eq!(ind.total_overrun, Money::ZERO);
    assert!(!ind.is_balanced());

    session.set_lever("envelope_1", money(3280.0)).unwrap();
    session.set_lever("envelope_2", money(3160.0)).unwrap();
    let ind = session.indicators();
    assert_eq!(ind.overrun(Mandate::First), Money::ZERO);
    assert_eq!(ind.overrun(Mandate::Second), Money::ZERO);
    assert!(ind.is_balanced());

    let exceeded: Vec<ArbitrageEvent> = events
        .borrow()
        .iter()
        .filter(|e| e.kind() == EventKind::BudgetExceeded)
        .cloned()
        .collect();
    assert_eq!(
        exceeded,
        vec![
            ArbitrageEvent::BudgetExceeded {
                mandate: Mandate::First,
                overrun: money(780.0),
            },
            ArbitrageEvent::BudgetExceeded {
                mandate: Mandate::Second,
                overrun: money(660.0),
            },
        ]
    );
    let restored = events
        .borrow()
        .iter()
        .filter(|e| e.kind() == EventKind::BudgetRestored)
        .count();
    assert_eq!(restored, 2);
}

#[test]
fn dropping_state_subsidy_hits_both_mandates() {
    let mut session = scenario().new_session();
    let before = Mandate::ALL.map(|m| session.available_capacity(m));

    let update = session.set_lever("state_subsidy", money(0.0)).unwrap();
    assert_eq!(update.previous, money(0.25));
    for m in Mandate::ALL {
        assert_eq!(before[m.index()] - session.available_capacity(m), money(300.0));
    }
}

#[test]
fn region_rate_is_clamped() {
    let mut session = scenario().new_session();
    let update = session
        .set_lever("region_cofinancing", money(3.0))
        .unwrap();
    assert!(update.was_clamped());
    assert_eq!(update.applied, money(1.0));
    // Only the first mandate receives regional co-financing.
    assert_eq!(session.available_capacity(Mandate::First), money(3780.0));
    assert_eq!(session.available_capacity(Mandate::Second), money(3300.0));
}

#[test]
fn reset_after_a_planning_session() {
    let mut session = scenario().new_session();
    base_plan(&mut session);
    session.set_lever("borrowing", money(0.0)).unwrap();

    session.clear_all();
    session.reset_levers();
    let ind = session.indicators();
    assert_eq!(ind.selected_count, 0);
    assert_eq!(ind.total_capacity, money(6660.0));
}
