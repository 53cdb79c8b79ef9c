//! Region (federal state) model.
//!
//! This module defines the closed set of sixteen German federal states for
//! which regional public holidays are generated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A German federal state, identified by its two-letter code.
///
/// # Example
///
/// ```
/// use worktime_engine::models::Region;
///
/// let region: Region = "HE".parse().unwrap();
/// assert_eq!(region, Region::Hessen);
/// assert_eq!(region.display_name(), "Hessen");
/// assert_eq!(Region::parse_lenient("XX"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Baden-Württemberg.
    #[serde(rename = "BW")]
    BadenWuerttemberg,
    /// Bayern.
    #[serde(rename = "BY")]
    Bayern,
    /// Berlin.
    #[serde(rename = "BE")]
    Berlin,
    /// Brandenburg.
    #[serde(rename = "BB")]
    Brandenburg,
    /// Bremen.
    #[serde(rename = "HB")]
    Bremen,
    /// Hamburg.
    #[serde(rename = "HH")]
    Hamburg,
    /// Hessen.
    #[serde(rename = "HE")]
    Hessen,
    /// Mecklenburg-Vorpommern.
    #[serde(rename = "MV")]
    MecklenburgVorpommern,
    /// Niedersachsen.
    #[serde(rename = "NI")]
    Niedersachsen,
    /// Nordrhein-Westfalen.
    #[serde(rename = "NW")]
    NordrheinWestfalen,
    /// Rheinland-Pfalz.
    #[serde(rename = "RP")]
    RheinlandPfalz,
    /// Saarland.
    #[serde(rename = "SL")]
    Saarland,
    /// Sachsen.
    #[serde(rename = "SN")]
    Sachsen,
    /// Sachsen-Anhalt.
    #[serde(rename = "ST")]
    SachsenAnhalt,
    /// Schleswig-Holstein.
    #[serde(rename = "SH")]
    SchleswigHolstein,
    /// Thüringen.
    #[serde(rename = "TH")]
    Thueringen,
}

impl Region {
    /// All regions, in the order they are listed to users.
    pub const ALL: [Region; 16] = [
        Region::BadenWuerttemberg,
        Region::Bayern,
        Region::Berlin,
        Region::Brandenburg,
        Region::Bremen,
        Region::Hamburg,
        Region::Hessen,
        Region::MecklenburgVorpommern,
        Region::Niedersachsen,
        Region::NordrheinWestfalen,
        Region::RheinlandPfalz,
        Region::Saarland,
        Region::Sachsen,
        Region::SachsenAnhalt,
        Region::SchleswigHolstein,
        Region::Thueringen,
    ];

    /// Returns the two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Region::BadenWuerttemberg => "BW",
            Region::Bayern => "BY",
            Region::Berlin => "BE",
            Region::Brandenburg => "BB",
            Region::Bremen => "HB",
            Region::Hamburg => "HH",
            Region::Hessen => "HE",
            Region::MecklenburgVorpommern => "MV",
            Region::Niedersachsen => "NI",
            Region::NordrheinWestfalen => "NW",
            Region::RheinlandPfalz => "RP",
            Region::Saarland => "SL",
            Region::Sachsen => "SN",
            Region::SachsenAnhalt => "ST",
            Region::SchleswigHolstein => "SH",
            Region::Thueringen => "TH",
        }
    }

    /// Returns the state's display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Region::BadenWuerttemberg => "Baden-Württemberg",
            Region::Bayern => "Bayern",
            Region::Berlin => "Berlin",
            Region::Brandenburg => "Brandenburg",
            Region::Bremen => "Bremen",
            Region::Hamburg => "Hamburg",
            Region::Hessen => "Hessen",
            Region::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Region::Niedersachsen => "Niedersachsen",
            Region::NordrheinWestfalen => "Nordrhein-Westfalen",
            Region::RheinlandPfalz => "Rheinland-Pfalz",
            Region::Saarland => "Saarland",
            Region::Sachsen => "Sachsen",
            Region::SachsenAnhalt => "Sachsen-Anhalt",
            Region::SchleswigHolstein => "Schleswig-Holstein",
            Region::Thueringen => "Thüringen",
        }
    }

    /// Parses a code, returning `None` for anything outside the closed set.
    pub fn parse_lenient(code: &str) -> Option<Region> {
        code.parse().ok()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = EngineError;

    /// Accepts the two-letter code, trimmed and ASCII case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| EngineError::UnknownRegion {
                code: code.to_string(),
            })
    }
}
