// Monitored structure and site domain models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    Bridge,
    Floating,
    Building,
    Towers,
}

impl StructureType {
    pub const ALL: [StructureType; 4] = [
        StructureType::Bridge,
        StructureType::Floating,
        StructureType::Building,
        StructureType::Towers,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StructureType::Bridge => "bridge",
            StructureType::Floating => "floating",
            StructureType::Building => "building",
            StructureType::Towers => "towers",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StructureType::Bridge => "Bridge",
            StructureType::Floating => "Floating Structure",
            StructureType::Building => "Building",
            StructureType::Towers => "Towers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StructureType::Bridge => "Highway, railway, or pedestrian bridges",
            StructureType::Floating => "Offshore platforms, floating docks",
            StructureType::Building => "High-rise buildings, commercial structures",
            StructureType::Towers => "Communication towers, power transmission towers",
        }
    }
}

/// Geographic site of the monitored structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    /// Build from manually entered coordinates. Returns `None` unless both
    /// parse as finite numbers. Coordinates are kept to six decimals and the
    /// address falls back to the raw coordinate pair.
    pub fn from_coordinates(lat: &str, lng: &str, address: Option<&str>) -> Option<Self> {
        let lat_value = parse_coordinate(lat)?;
        let lng_value = parse_coordinate(lng)?;

        let address = match address.map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => format!("{}, {}", lat.trim(), lng.trim()),
        };

        Some(Self {
            lat: round_six_decimals(lat_value),
            lng: round_six_decimals(lng_value),
            address,
        })
    }

    pub fn coordinates_label(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn round_six_decimals(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
