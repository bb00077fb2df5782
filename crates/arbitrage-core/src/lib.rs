//! Arbitrage Core -- the budget engine for transit investment planning.
//!
//! Users pick candidate transit projects (metro, tramway, bus lines) from a
//! fixed catalog, schedule each in the first mandate, the second, or spread
//! across both, and tune financing levers. The engine reports, after every
//! change, whether the plan fits the capacity those levers provide.
//!
//! # Components
//!
//! 1. **Catalog** -- immutable list of projects, built once at startup.
//! 2. **Financing** -- lever definitions and current values, turned into
//!    capacity per mandate.
//! 3. **Selection** -- the period assigned to every project.
//! 4. **Indicators** -- pure derivation of committed cost, overrun and
//!    surplus from the three above.
//!
//! # Key Types
//!
//! - [`session::Session`] -- Owns all state; the only entry point for mutation.
//! - [`catalog::Catalog`] -- Frozen project list with key lookup.
//! - [`financing::FinancingModel`] -- Levers and capacity computation.
//! - [`selection::SelectionState`] -- Project-to-period map.
//! - [`indicators::compute_indicators`] -- The indicator engine.
//! - [`event::EventBus`] -- Synchronous listener delivery and event history.
//! - [`fixed::Money`] -- Q32.32 fixed-point amount in millions.

pub mod catalog;
pub mod event;
pub mod financing;
pub mod fixed;
pub mod id;
pub mod indicators;
pub mod period;
pub mod selection;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
