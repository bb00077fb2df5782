//! Serde data file structs for scenario definitions.
//!
//! These structs define the on-disk format for the project catalog and the
//! financing levers. They are deserialized from RON, JSON, or TOML data files
//! and then converted into engine types by the scenario loader.

use serde::Deserialize;

// ===========================================================================
// Catalog
// ===========================================================================

/// A candidate project in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectData {
    pub id: String,
    pub name: String,
    /// Cost in millions of currency units.
    pub cost: f64,
    /// Estimated daily ridership.
    #[serde(default)]
    pub impact: Option<u32>,
    #[serde(default)]
    pub mandat_only: Option<PeriodData>,
    #[serde(default)]
    pub mode: ModeData,
}

/// A period a project can be constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodData {
    First,
    Second,
    Spread,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeData {
    Metro,
    Tramway,
    Bus,
    Bhns,
    #[default]
    Other,
}

// ===========================================================================
// Financing
// ===========================================================================

/// A financing lever in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct LeverData {
    pub name: String,
    /// Display label. Defaults to the name.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub effect: EffectData,
}

/// How a lever contributes to capacity.
#[derive(Debug, Clone, Deserialize)]
pub enum EffectData {
    Envelope {
        mandate: MandateData,
    },
    Ceiling,
    Rate {
        base: f64,
        #[serde(default)]
        applies_to: Option<MandateData>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandateData {
    First,
    Second,
}

// ===========================================================================
// TOML wrappers
// ===========================================================================

/// Wrapper for a list of projects in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlProjects {
    pub projects: Vec<ProjectData>,
}

/// Wrapper for a list of levers in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlLevers {
    pub levers: Vec<LeverData>,
}

impl From<TomlProjects> for Vec<ProjectData> {
    fn from(wrapper: TomlProjects) -> Self {
        wrapper.projects
    }
}

impl From<TomlLevers> for Vec<LeverData> {
    fn from(wrapper: TomlLevers) -> Self {
        wrapper.levers
    }
}
