use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored stellar system.
/// Opaque to the core: resolving it against the backend is the loader's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub String);

impl SystemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SystemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SystemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Handle of a single camera motion. A fresh id is issued on every retarget,
/// so start/end events can be matched to the motion that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionId(pub u32);
