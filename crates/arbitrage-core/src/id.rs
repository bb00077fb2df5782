use serde::{Deserialize, Serialize};

/// Identifies a project in the catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub u32);

/// Identifies a financing lever in the financing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeverId(pub u32);

impl ProjectId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl LeverId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
