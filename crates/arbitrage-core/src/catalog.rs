use crate::fixed::Money;
use crate::id::ProjectId;
use crate::period::MandatPeriod;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of line a project builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportMode {
    Metro,
    Tramway,
    Bus,
    /// Bus à haut niveau de service (bus rapid transit).
    Bhns,
    #[default]
    Other,
}

/// A candidate project as registered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique string key, used by every caller outside the core.
    pub key: String,
    pub name: String,
    /// Total cost in millions of currency units.
    pub cost: Money,
    /// Estimated daily ridership, when known.
    pub impact: Option<u32>,
    /// If set, the only period this project may be scheduled in.
    pub mandat_only: Option<MandatPeriod>,
    pub mode: TransportMode,
}

impl Project {
    /// The periods this project may be assigned to. `Unassigned` is always
    /// reachable on top of these.
    pub fn selectable_periods(&self) -> &[MandatPeriod] {
        match &self.mandat_only {
            Some(only) => std::slice::from_ref(only),
            None => &MandatPeriod::SCHEDULABLE,
        }
    }

    /// Returns `true` if `period` is a legal assignment for this project.
    pub fn accepts(&self, period: MandatPeriod) -> bool {
        period == MandatPeriod::Unassigned || self.selectable_periods().contains(&period)
    }
}

/// Builder for constructing an immutable Catalog.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    projects: Vec<Project>,
    key_to_id: HashMap<String, ProjectId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project. Returns its ID.
    pub fn register(&mut self, project: Project) -> Result<ProjectId, CatalogError> {
        if self.key_to_id.contains_key(&project.key) {
            return Err(CatalogError::DuplicateKey(project.key));
        }
        if project.cost < Money::ZERO {
            return Err(CatalogError::NegativeCost(project.key));
        }
        if project.mandat_only == Some(MandatPeriod::Unassigned) {
            return Err(CatalogError::InvalidConstraint(project.key));
        }

        let id = ProjectId(self.projects.len() as u32);
        self.key_to_id.insert(project.key.clone(), id);
        self.projects.push(project);
        Ok(id)
    }

    /// Lookup project ID by key.
    pub fn project_id(&self, key: &str) -> Option<ProjectId> {
        self.key_to_id.get(key).copied()
    }

    /// Finalize and build the immutable catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            projects: self.projects,
            key_to_id: self.key_to_id,
        }
    }
}

/// Immutable catalog of candidate projects. Frozen after build().
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    key_to_id: HashMap<String, ProjectId>,
}

impl Catalog {
    /// All projects, in registration order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look a project up by key. Unknown keys yield `None`.
    pub fn find(&self, key: &str) -> Option<&Project> {
        self.project_id(key).and_then(|id| self.get(id))
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(id.index())
    }

    pub fn project_id(&self, key: &str) -> Option<ProjectId> {
        self.key_to_id.get(key).copied()
    }

    /// Iterate over `(id, project)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectId, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .map(|(i, p)| (ProjectId(i as u32), p))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate project key: {0}")]
    DuplicateKey(String),
    #[error("project {0} has a negative cost")]
    NegativeCost(String),
    #[error("project {0} is constrained to the unassigned period")]
    InvalidConstraint(String),
}
