//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::catalog::{Catalog, CatalogBuilder, Project, TransportMode};
use crate::financing::{FinancingBuilder, FinancingModel, LeverDef, LeverDomain, LeverEffect};
use crate::fixed::{Fixed64, Money};
use crate::period::{Mandate, MandatPeriod};
use crate::session::Session;

pub fn money(v: f64) -> Money {
    Money::from_num(v)
}

pub fn project(key: &str, cost: f64, mandat_only: Option<MandatPeriod>) -> Project {
    Project {
        key: key.to_string(),
        name: key.to_string(),
        cost: money(cost),
        impact: None,
        mandat_only,
        mode: TransportMode::Other,
    }
}

/// Two projects: `a` (500, unconstrained, 40 000 riders a day) and
/// `b` (300, spread only).
pub fn sample_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    let mut a = project("a", 500.0, None);
    a.impact = Some(40_000);
    a.mode = TransportMode::Tramway;
    b.register(a).expect("register a");
    b.register(project("b", 300.0, Some(MandatPeriod::Spread)))
        .expect("register b");
    b.build()
}

/// `n` unconstrained projects `p0..pn` costing `10 * (i + 1)`, every third
/// one spread-only.
pub fn generated_catalog(n: usize) -> Catalog {
    let mut b = CatalogBuilder::new();
    for i in 0..n {
        let only = (i % 3 == 2).then_some(MandatPeriod::Spread);
        b.register(project(&format!("p{i}"), 10.0 * (i as f64 + 1.0), only))
            .expect("unique keys");
    }
    b.build()
}

pub fn envelope_lever(name: &str, mandate: Mandate, default: f64) -> LeverDef {
    LeverDef {
        name: name.to_string(),
        label: name.to_string(),
        domain: LeverDomain::new(Fixed64::ZERO, money(10_000.0)),
        default: money(default),
        effect: LeverEffect::Envelope(mandate),
    }
}

/// A model made of a single envelope per mandate, named `envelope_1` and
/// `envelope_2`.
pub fn flat_financing(first: f64, second: f64) -> FinancingModel {
    let mut b = FinancingBuilder::new();
    b.register(envelope_lever("envelope_1", Mandate::First, first));
    b.register(envelope_lever("envelope_2", Mandate::Second, second));
    b.build().expect("valid levers")
}

/// Envelopes plus a borrowing ceiling and a subsidy rate on the second mandate.
pub fn full_financing() -> FinancingModel {
    let mut b = FinancingBuilder::new();
    b.register(envelope_lever("envelope_1", Mandate::First, 500.0));
    b.register(envelope_lever("envelope_2", Mandate::Second, 500.0));
    b.register(LeverDef {
        name: "borrowing".to_string(),
        label: "Borrowing ceiling".to_string(),
        domain: LeverDomain::new(Fixed64::ZERO, money(2_000.0)),
        default: money(200.0),
        effect: LeverEffect::Ceiling,
    });
    b.register(LeverDef {
        name: "subsidy".to_string(),
        label: "Subsidy rate".to_string(),
        domain: LeverDomain::unit(),
        default: money(0.5),
        effect: LeverEffect::Rate {
            base: money(400.0),
            applies_to: Some(Mandate::Second),
        },
    });
    b.build().expect("valid levers")
}

pub fn sample_session(first: f64, second: f64) -> Session {
    Session::new(sample_catalog(), flat_financing(first, second))
}
