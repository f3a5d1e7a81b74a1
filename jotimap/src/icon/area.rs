use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One of the hunt areas. Groups, foxes and sightings are categorized by area; the area only
/// affects the marker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    /// Alpha.
    Alpha,
    /// Bravo.
    Bravo,
    /// Charlie.
    Charlie,
    /// Delta.
    Delta,
    /// Echo.
    Echo,
    /// Foxtrot.
    Foxtrot,
}

impl Area {
    /// All areas.
    pub const ALL: [Area; 6] = [
        Area::Alpha,
        Area::Bravo,
        Area::Charlie,
        Area::Delta,
        Area::Echo,
        Area::Foxtrot,
    ];

    /// Parses an area label. Matching ignores case and surrounding whitespace; anything that is
    /// not an area name gives `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|area| area.name().eq_ignore_ascii_case(label))
    }

    /// Canonical name of the area.
    pub fn name(&self) -> &'static str {
        match self {
            Area::Alpha => "Alpha",
            Area::Bravo => "Bravo",
            Area::Charlie => "Charlie",
            Area::Delta => "Delta",
            Area::Echo => "Echo",
            Area::Foxtrot => "Foxtrot",
        }
    }
}

impl Display for Area {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
