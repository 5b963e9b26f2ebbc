use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven classical planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl PlanetId {
    /// Fixed enumeration order used for snapshots and wire output.
    pub const ALL: [PlanetId; 7] = [
        PlanetId::Sun,
        PlanetId::Moon,
        PlanetId::Mercury,
        PlanetId::Venus,
        PlanetId::Mars,
        PlanetId::Jupiter,
        PlanetId::Saturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlanetId::Sun => "sun",
            PlanetId::Moon => "moon",
            PlanetId::Mercury => "mercury",
            PlanetId::Venus => "venus",
            PlanetId::Mars => "mars",
            PlanetId::Jupiter => "jupiter",
            PlanetId::Saturn => "saturn",
        }
    }

    /// Sun and Moon never show apparent retrograde motion from Earth.
    pub fn can_retrograde(self) -> bool {
        !matches!(self, PlanetId::Sun | PlanetId::Moon)
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PlanetId::ALL
            .iter()
            .copied()
            .find(|p| p.name() == lower)
            .ok_or_else(|| format!("Unknown planet: {}", s))
    }
}
