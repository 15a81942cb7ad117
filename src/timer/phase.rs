//! The two phases a workout alternates between

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Workout,
    Rest,
}

impl Phase {
    /// The phase that follows this one
    pub fn other(self) -> Self {
        match self {
            Phase::Workout => Phase::Rest,
            Phase::Rest => Phase::Workout,
        }
    }

    /// Text shown in the phase label
    pub fn label(self) -> &'static str {
        match self {
            Phase::Workout => "Workout",
            Phase::Rest => "Rest",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
