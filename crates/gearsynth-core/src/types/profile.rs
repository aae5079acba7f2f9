use serde::{Deserialize, Serialize};

/// Which outline drives the synthesis and gets exported for the driving body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Pitch curve modulated with scalloped teeth.
    #[default]
    Toothed,
    /// Plain pitch curve, for rolling friction bodies.
    FrictionDisc,
}

impl ProfileKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::Toothed => "toothed",
            ProfileKind::FrictionDisc => "friction_disc",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
