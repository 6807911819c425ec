use serde::{Deserialize, Serialize};

/// Genre catalogue. Ids are stable in the backend's genre table; keyword
/// search matches against the display label.
#[derive(
    Debug, Default, PartialEq, Clone, Copy, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Genre {
    Food,
    Event,
    Scene,
    Store,
    Emergency,
    #[default]
    Other,
}

impl Genre {
    pub fn id(&self) -> i32 {
        match self {
            Genre::Food => 0,
            Genre::Event => 1,
            Genre::Scene => 2,
            Genre::Store => 3,
            Genre::Emergency => 4,
            Genre::Other => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Food => "food",
            Genre::Event => "event",
            Genre::Scene => "scene",
            Genre::Store => "store",
            Genre::Emergency => "emergency",
            Genre::Other => "other",
        }
    }
}

impl From<i32> for Genre {
    fn from(value: i32) -> Self {
        match value {
            0 => Genre::Food,
            1 => Genre::Event,
            2 => Genre::Scene,
            3 => Genre::Store,
            4 => Genre::Emergency,
            _ => Genre::Other,
        }
    }
}

impl From<&str> for Genre {
    fn from(value: &str) -> Self {
        match value {
            "food" => Genre::Food,
            "event" => Genre::Event,
            "scene" => Genre::Scene,
            "store" => Genre::Store,
            "emergency" => Genre::Emergency,
            _ => Genre::Other,
        }
    }
}

impl From<Genre> for String {
    fn from(value: Genre) -> Self {
        value.label().to_string()
    }
}
