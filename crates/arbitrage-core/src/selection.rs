//! Per-project period assignments.
//!
//! The selection is a plain map from catalog project to [`MandatPeriod`].
//! Setting a period is idempotent: repeating a request leaves state as it
//! was. Translating a second click on the same period into a deselection is
//! left to the presentation layer.

use crate::catalog::Catalog;
use crate::id::ProjectId;
use crate::period::MandatPeriod;

/// Current period of every catalog project. Starts with everything unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    periods: Vec<MandatPeriod>,
}

impl SelectionState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            periods: vec![MandatPeriod::Unassigned; catalog.len()],
        }
    }

    /// The current period of `project`. Ids outside the catalog read as unassigned.
    pub fn get(&self, project: ProjectId) -> MandatPeriod {
        self.periods
            .get(project.index())
            .copied()
            .unwrap_or_default()
    }

    /// Assign `period` to `project`, returning the previous period.
    ///
    /// Periods outside the project's selectable set are rejected and the
    /// prior assignment is kept.
    pub fn set(
        &mut self,
        catalog: &Catalog,
        project: ProjectId,
        period: MandatPeriod,
    ) -> Result<MandatPeriod, SelectionError> {
        let def = catalog
            .get(project)
            .ok_or(SelectionError::UnknownId(project))?;
        if !def.accepts(period) {
            return Err(SelectionError::InvalidAssignment {
                project: def.key.clone(),
                requested: period,
                allowed: def.selectable_periods().to_vec(),
            });
        }
        let slot = self
            .periods
            .get_mut(project.index())
            .ok_or(SelectionError::UnknownId(project))?;
        Ok(std::mem::replace(slot, period))
    }

    /// Reset every project to unassigned. Returns how many were selected.
    pub fn clear_all(&mut self) -> usize {
        let mut cleared = 0;
        for period in &mut self.periods {
            if period.is_assigned() {
                *period = MandatPeriod::Unassigned;
                cleared += 1;
            }
        }
        cleared
    }

    /// Iterate over the projects that have a period, in catalog order.
    pub fn assigned(&self) -> impl Iterator<Item = (ProjectId, MandatPeriod)> + '_ {
        self.periods
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_assigned())
            .map(|(i, p)| (ProjectId(i as u32), *p))
    }

    pub fn selected_count(&self) -> usize {
        self.periods.iter().filter(|p| p.is_assigned()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no such project: {0}")]
    NotFound(String),
    /// An id that does not belong to the catalog the state was built from.
    #[error("no project with id {0:?}")]
    UnknownId(ProjectId),
    #[error("project {project} cannot be scheduled as {requested} (allowed: {allowed:?})")]
    InvalidAssignment {
        project: String,
        requested: MandatPeriod,
        allowed: Vec<MandatPeriod>,
    },
}
