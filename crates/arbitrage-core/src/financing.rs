//! Financing levers and the capacity they provide to each mandate.
//!
//! A [`FinancingModel`] holds a fixed set of lever definitions, registered at
//! startup, and one current value per lever. Capacity is never cached: every
//! call to [`FinancingModel::available_capacity`] sums the contribution of
//! each lever from its current value.
//!
//! # Lever effects
//!
//! - [`LeverEffect::Envelope`]: own-funds budget of a single mandate.
//! - [`LeverEffect::Ceiling`]: borrowing ceiling, granted to every mandate.
//! - [`LeverEffect::Rate`]: a subsidy or co-financing rate in `[0, 1]`
//!   applied to a base amount.
//!
//! Every domain is non-negative, so raising any lever never lowers capacity.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed64, Money};
use crate::id::LeverId;
use crate::period::Mandate;

// ---------------------------------------------------------------------------
// Lever definitions
// ---------------------------------------------------------------------------

/// Closed interval a lever value must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverDomain {
    pub min: Fixed64,
    pub max: Fixed64,
}

impl LeverDomain {
    pub fn new(min: Fixed64, max: Fixed64) -> Self {
        Self { min, max }
    }

    /// The `[0, 1]` domain used by rates.
    pub fn unit() -> Self {
        Self::new(Fixed64::ZERO, Fixed64::ONE)
    }

    pub fn contains(&self, value: Fixed64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: Fixed64) -> Fixed64 {
        value.clamp(self.min, self.max)
    }
}

/// How a lever's value turns into capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverEffect {
    /// Value is added to the capacity of one mandate.
    Envelope(Mandate),
    /// Value is added to the capacity of every mandate.
    Ceiling,
    /// `value * base` is added to `applies_to`, or to every mandate when `None`.
    Rate {
        base: Money,
        applies_to: Option<Mandate>,
    },
}

impl LeverEffect {
    pub fn affects(&self, mandate: Mandate) -> bool {
        match self {
            LeverEffect::Envelope(m) => *m == mandate,
            LeverEffect::Ceiling => true,
            LeverEffect::Rate { applies_to, .. } => applies_to.is_none_or(|m| m == mandate),
        }
    }

    /// Capacity contributed to `mandate` by a lever set to `value`.
    fn contribution(&self, mandate: Mandate, value: Fixed64) -> Money {
        if !self.affects(mandate) {
            return Money::ZERO;
        }
        match self {
            LeverEffect::Envelope(_) | LeverEffect::Ceiling => value,
            LeverEffect::Rate { base, .. } => value.saturating_mul(*base),
        }
    }
}

/// A financing lever as registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverDef {
    /// Unique name, used by every caller outside the core.
    pub name: String,
    pub label: String,
    pub domain: LeverDomain,
    pub default: Fixed64,
    pub effect: LeverEffect,
}

/// Read-only view of a lever and its current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverView<'a> {
    pub id: LeverId,
    pub def: &'a LeverDef,
    pub value: Fixed64,
}

/// Outcome of [`FinancingModel::set_lever`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeverUpdate {
    pub lever: LeverId,
    pub previous: Fixed64,
    pub requested: Fixed64,
    /// The value actually stored, after clamping to the domain.
    pub applied: Fixed64,
}

impl LeverUpdate {
    pub fn was_clamped(&self) -> bool {
        self.requested != self.applied
    }

    pub fn changed(&self) -> bool {
        self.previous != self.applied
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects lever definitions and validates them into a [`FinancingModel`].
#[derive(Debug, Default)]
pub struct FinancingBuilder {
    levers: Vec<LeverDef>,
}

impl FinancingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lever. Returns its ID. Validation happens in [`build`](Self::build).
    pub fn register(&mut self, lever: LeverDef) -> LeverId {
        let id = LeverId(self.levers.len() as u32);
        self.levers.push(lever);
        id
    }

    pub fn build(self) -> Result<FinancingModel, FinancingError> {
        let mut name_to_id = HashMap::with_capacity(self.levers.len());
        for (i, lever) in self.levers.iter().enumerate() {
            validate(lever)?;
            if name_to_id
                .insert(lever.name.clone(), LeverId(i as u32))
                .is_some()
            {
                return Err(FinancingError::DuplicateLever(lever.name.clone()));
            }
        }

        let values = self.levers.iter().map(|l| l.default).collect();
        Ok(FinancingModel {
            levers: self.levers,
            name_to_id,
            values,
        })
    }
}

fn validate(lever: &LeverDef) -> Result<(), FinancingError> {
    let invalid = |reason: &'static str| FinancingError::InvalidDomain {
        lever: lever.name.clone(),
        reason,
    };
    let LeverDomain { min, max } = lever.domain;

    if min > max {
        return Err(invalid("minimum exceeds maximum"));
    }
    if min < Fixed64::ZERO {
        return Err(invalid("negative minimum"));
    }
    if !lever.domain.contains(lever.default) {
        return Err(invalid("default outside domain"));
    }
    if let LeverEffect::Rate { base, .. } = lever.effect {
        if max > Fixed64::ONE {
            return Err(invalid("rate above 1"));
        }
        if base < Money::ZERO {
            return Err(invalid("negative rate base"));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Financing model
// ---------------------------------------------------------------------------

/// The financing levers of a session and their current settings.
#[derive(Debug, Clone)]
pub struct FinancingModel {
    levers: Vec<LeverDef>,
    name_to_id: HashMap<String, LeverId>,
    values: Vec<Fixed64>,
}

impl FinancingModel {
    /// Every lever with its current value, in registration order.
    pub fn levers(&self) -> impl Iterator<Item = LeverView<'_>> {
        self.levers
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (def, value))| LeverView {
                id: LeverId(i as u32),
                def,
                value: *value,
            })
    }

    pub fn lever_id(&self, name: &str) -> Option<LeverId> {
        self.name_to_id.get(name).copied()
    }

    pub fn lever(&self, name: &str) -> Option<LeverView<'_>> {
        let id = self.lever_id(name)?;
        Some(LeverView {
            id,
            def: &self.levers[id.index()],
            value: self.values[id.index()],
        })
    }

    pub fn value(&self, name: &str) -> Option<Fixed64> {
        self.lever(name).map(|l| l.value)
    }

    pub fn lever_count(&self) -> usize {
        self.levers.len()
    }

    /// Set a lever by name. Out-of-domain values are clamped to the domain.
    pub fn set_lever(&mut self, name: &str, value: Fixed64) -> Result<LeverUpdate, FinancingError> {
        let id = self
            .lever_id(name)
            .ok_or_else(|| FinancingError::UnknownLever(name.to_string()))?;
        let def = &self.levers[id.index()];
        let applied = def.domain.clamp(value);
        if applied != value {
            warn!(
                "lever {name}: {value} outside [{}, {}], clamped to {applied}",
                def.domain.min, def.domain.max
            );
        }

        let previous = std::mem::replace(&mut self.values[id.index()], applied);
        debug!("lever {name}: {previous} -> {applied}");
        Ok(LeverUpdate {
            lever: id,
            previous,
            requested: value,
            applied,
        })
    }

    /// Restore every lever to its default value.
    pub fn reset_levers(&mut self) {
        for (value, def) in self.values.iter_mut().zip(&self.levers) {
            *value = def.default;
        }
    }

    /// Capacity available to `mandate` under the current lever settings.
    pub fn available_capacity(&self, mandate: Mandate) -> Money {
        self.levers
            .iter()
            .zip(&self.values)
            .map(|(def, value)| def.effect.contribution(mandate, *value))
            .fold(Money::ZERO, |acc, c| acc.saturating_add(c))
            .max(Money::ZERO)
    }

    /// Sum of the capacity of both mandates.
    pub fn total_capacity(&self) -> Money {
        Mandate::ALL
            .iter()
            .map(|m| self.available_capacity(*m))
            .fold(Money::ZERO, |acc, c| acc.saturating_add(c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinancingError {
    #[error("unknown lever: {0}")]
    UnknownLever(String),
    #[error("duplicate lever: {0}")]
    DuplicateLever(String),
    #[error("invalid domain for lever {lever}: {reason}")]
    InvalidDomain { lever: String, reason: &'static str },
}
