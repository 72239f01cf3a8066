use serde::{Deserialize, Serialize};

/// Maps offered by the recorder, in display order.
pub const MAPS: [&str; 11] = [
    "pearl", "fracture", "ascent", "breeze", "haven", "split", "icebox", "lotus", "bind", "sunset",
    "abyss",
];

pub const DEFAULT_MAP: &str = "pearl";

/// Extension appended to every callout name.
pub const IMAGE_EXTENSION: &str = ".png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Spells,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Spells,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Spells => "spells",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Unknown difficulty: {}", s))
    }
}

/// A point relative to the image's own bounds, each axis in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    /// Build a point, clamping both axes into [0, 1]. NaN collapses to 0.
    pub fn clamped(x: f64, y: f64) -> Self {
        let unit = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        NormalizedPoint {
            x: unit(x),
            y: unit(y),
        }
    }

    /// Readout shown under the map, e.g. `x=0.2500, y=0.4000`.
    pub fn readout(&self) -> String {
        format!("x={:.4}, y={:.4}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callout {
    pub image_name: String,
    pub location: NormalizedPoint,
}

/// The per-map/per-difficulty document, both the export format and the on-disk store format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutDocument {
    pub difficulty: Difficulty,
    // Older documents may lack the list entirely.
    #[serde(default)]
    pub callouts: Vec<Callout>,
}

impl CalloutDocument {
    pub fn empty(difficulty: Difficulty) -> Self {
        CalloutDocument {
            difficulty,
            callouts: Vec::new(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Body of `POST /api/updateMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendRequest {
    pub map: String,
    pub difficulty: Difficulty,
    pub filename: String,
    pub coordinates: NormalizedPoint,
}

/// Success body of `POST /api/updateMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendResponse {
    pub success: bool,
}

/// Failure body returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Image asset for a map.
pub fn map_image_name(map: &str) -> String {
    format!("{}{}", map, IMAGE_EXTENSION)
}

/// Download name for an exported session, e.g. `easy-pearl.json`.
pub fn export_file_name(difficulty: Difficulty, map: &str) -> String {
    format!("{}-{}.json", difficulty, map)
}
