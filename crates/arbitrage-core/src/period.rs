//! Mandate periods and the assignments a project can take.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two political terms that carry a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mandate {
    First,
    Second,
}

impl Mandate {
    /// Both mandates, in chronological order.
    pub const ALL: [Mandate; 2] = [Mandate::First, Mandate::Second];

    /// Index into per-mandate arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Mandate::First => 0,
            Mandate::Second => 1,
        }
    }
}

impl fmt::Display for Mandate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mandate::First => f.write_str("first mandate"),
            Mandate::Second => f.write_str("second mandate"),
        }
    }
}

/// The period a project is scheduled in.
///
/// `Spread` means the project spans both mandates and weighs on both
/// budgets at full cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MandatPeriod {
    #[default]
    Unassigned,
    First,
    Second,
    Spread,
}

impl MandatPeriod {
    /// Every period a project without a constraint may be scheduled in.
    pub const SCHEDULABLE: [MandatPeriod; 3] =
        [MandatPeriod::First, MandatPeriod::Second, MandatPeriod::Spread];

    /// The mandates whose budget this period draws on.
    pub fn mandates(self) -> &'static [Mandate] {
        match self {
            MandatPeriod::Unassigned => &[],
            MandatPeriod::First => &[Mandate::First],
            MandatPeriod::Second => &[Mandate::Second],
            MandatPeriod::Spread => &Mandate::ALL,
        }
    }

    pub fn touches(self, mandate: Mandate) -> bool {
        self.mandates().contains(&mandate)
    }

    pub fn is_assigned(self) -> bool {
        self != MandatPeriod::Unassigned
    }
}

impl From<Mandate> for MandatPeriod {
    fn from(m: Mandate) -> Self {
        match m {
            Mandate::First => MandatPeriod::First,
            Mandate::Second => MandatPeriod::Second,
        }
    }
}

impl fmt::Display for MandatPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MandatPeriod::Unassigned => f.write_str("unassigned"),
            MandatPeriod::First => f.write_str("first"),
            MandatPeriod::Second => f.write_str("second"),
            MandatPeriod::Spread => f.write_str("spread"),
        }
    }
}
