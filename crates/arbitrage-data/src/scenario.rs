//! Loading pipeline: reads the scenario files of a directory and builds the
//! catalog and financing model of a session.
//!
//! A scenario directory contains two required files, each in RON, TOML, or
//! JSON:
//!
//! - `projects.*` -- the project catalog (TOML key `projects`).
//! - `financing.*` -- the financing levers (TOML key `levers`).

use std::path::Path;

use arbitrage_core::catalog::{Catalog, CatalogBuilder, Project, TransportMode};
use arbitrage_core::financing::{
    FinancingBuilder, FinancingModel, LeverDef, LeverDomain, LeverEffect,
};
use arbitrage_core::period::{Mandate, MandatPeriod};
use arbitrage_core::session::Session;
use log::info;

use crate::loader::{DataLoadError, deserialize_list, require_data_file, to_fixed};
use crate::schema::*;

/// A loaded scenario, ready to start sessions from.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub catalog: Catalog,
    pub financing: FinancingModel,
}

impl Scenario {
    /// Start a fresh session: every project unassigned, every lever at its default.
    pub fn new_session(&self) -> Session {
        Session::new(self.catalog.clone(), self.financing.clone())
    }
}

/// Load a scenario from `dir`.
pub fn load_scenario(dir: &Path) -> Result<Scenario, DataLoadError> {
    let projects_path = require_data_file(dir, "projects")?;
    let financing_path = require_data_file(dir, "financing")?;

    let catalog = build_catalog(
        &projects_path,
        deserialize_list::<_, TomlProjects>(&projects_path)?,
    )?;
    let financing = build_financing(
        &financing_path,
        deserialize_list::<_, TomlLevers>(&financing_path)?,
    )?;

    info!(
        "loaded scenario {}: {} projects, {} levers",
        dir.display(),
        catalog.len(),
        financing.lever_count()
    );
    Ok(Scenario { catalog, financing })
}

/// Convert project entries into a catalog, preserving file order.
pub fn build_catalog(path: &Path, projects: Vec<ProjectData>) -> Result<Catalog, DataLoadError> {
    let mut builder = CatalogBuilder::new();
    for data in projects {
        let cost = to_fixed(data.cost, path, &data.id, "cost")?;
        builder.register(Project {
            cost,
            impact: data.impact,
            mandat_only: data.mandat_only.map(period),
            mode: mode(data.mode),
            key: data.id,
            name: data.name,
        })?;
    }
    Ok(builder.build())
}

/// Convert lever entries into a validated financing model.
pub fn build_financing(
    path: &Path,
    levers: Vec<LeverData>,
) -> Result<FinancingModel, DataLoadError> {
    let mut builder = FinancingBuilder::new();
    for data in levers {
        let name = data.name.as_str();
        let domain = LeverDomain::new(
            to_fixed(data.min, path, name, "min")?,
            to_fixed(data.max, path, name, "max")?,
        );
        let default = to_fixed(data.default, path, name, "default")?;
        let effect = match data.effect {
            EffectData::Envelope { mandate: m } => LeverEffect::Envelope(mandate(m)),
            EffectData::Ceiling => LeverEffect::Ceiling,
            EffectData::Rate { base, applies_to } => LeverEffect::Rate {
                base: to_fixed(base, path, name, "base")?,
                applies_to: applies_to.map(mandate),
            },
        };
        builder.register(LeverDef {
            label: data.label.unwrap_or_else(|| data.name.clone()),
            name: data.name,
            domain,
            default,
            effect,
        });
    }
    Ok(builder.build()?)
}

fn period(p: PeriodData) -> MandatPeriod {
    match p {
        PeriodData::First => MandatPeriod::First,
        PeriodData::Second => MandatPeriod::Second,
        PeriodData::Spread => MandatPeriod::Spread,
    }
}

fn mandate(m: MandateData) -> Mandate {
    match m {
        MandateData::First => Mandate::First,
        MandateData::Second => Mandate::Second,
    }
}

fn mode(m: ModeData) -> TransportMode {
    match m {
        ModeData::Metro => TransportMode::Metro,
        ModeData::Tramway => TransportMode::Tramway,
        ModeData::Bus => TransportMode::Bus,
        ModeData::Bhns => TransportMode::Bhns,
        ModeData::Other => TransportMode::Other,
    }
}
