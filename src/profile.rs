//! Serializable editing state for the graphic.
//!
//! A [`GraphicProfile`] captures the user-edited rows (names, assigned
//! characters), the border toggle and optional filter settings in a JSON
//! form a frontend can round-trip. Fetched standings seed a profile via
//! [`GraphicProfile::from_standings`]; the edited profile is what the
//! renderer consumes.
//!
//! # Example
//!
//! ```
//! use top8_renderer::{EntrySettings, GraphicProfile};
//!
//! let profile = GraphicProfile::new()
//!     .with_entry(EntrySettings::new("1", "Mango", "Falco"))
//!     .with_border(true);
//!
//! let json = profile.to_json().unwrap();
//! let restored = GraphicProfile::from_json(&json).unwrap();
//! assert_eq!(restored.entries.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::FilterParams;
use crate::graphic::RenderEntry;
use crate::standings::StandingEntry;

// ============================================================================
// EntrySettings
// ============================================================================

/// One editable row: placement text, entrant name and assigned character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntrySettings {
    pub place: String,
    pub name: String,

    /// Assigned character; empty until the user picks one.
    #[serde(default)]
    pub character: String,
}

impl EntrySettings {
    pub fn new(
        place: impl Into<String>,
        name: impl Into<String>,
        character: impl Into<String>,
    ) -> Self {
        Self {
            place: place.into(),
            name: name.into(),
            character: character.into(),
        }
    }
}

// ============================================================================
// GraphicProfile
// ============================================================================

/// The complete editable state for one graphic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GraphicProfile {
    /// Rows in render order.
    pub entries: Vec<EntrySettings>,

    /// Whether to stroke a border around the graphic.
    #[serde(default)]
    pub add_border: bool,

    /// Filter settings, when the user configured the image filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterParams>,
}

impl GraphicProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds editable rows from fetched standings, preserving their order.
    pub fn from_standings(standings: &[StandingEntry]) -> Self {
        Self {
            entries: standings
                .iter()
                .map(|s| EntrySettings::new(s.placement.to_string(), s.entrant_name.clone(), ""))
                .collect(),
            ..Self::default()
        }
    }

    /// Adds a row.
    pub fn with_entry(mut self, entry: EntrySettings) -> Self {
        self.entries.push(entry);
        self
    }

    /// Sets the border toggle.
    pub fn with_border(mut self, add_border: bool) -> Self {
        self.add_border = add_border;
        self
    }

    /// Sets the filter settings.
    pub fn with_filter(mut self, filter: FilterParams) -> Self {
        self.filter = Some(filter);
        self
    }

    /// The saved filter settings, or the no-op defaults when the user never
    /// configured the filter.
    pub fn filter_params(&self) -> FilterParams {
        self.filter.clone().unwrap_or_default()
    }

    /// Converts the rows into render entries (icons not yet loaded).
    pub fn render_entries(&self) -> Vec<RenderEntry> {
        self.entries
            .iter()
            .map(|e| RenderEntry::new(e.place.clone(), e.name.clone(), e.character.clone()))
            .collect()
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::MalformedResponse(format!("profile serialization: {e}")))
    }

    /// Parses a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::MalformedResponse(format!("profile parse: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let profile = GraphicProfile::new()
            .with_entry(EntrySettings::new("1", "Mango", "Falco"))
            .with_entry(EntrySettings::new("2", "Zain", ""))
            .with_border(true)
            .with_filter(FilterParams {
                hue_shift: 120.0,
                saturation_adjust: 50.0,
                lightness_adjust: -10.0,
                remove_background: true,
            });

        let json = profile.to_json().unwrap();
        assert!(json.contains("\"addBorder\""));
        assert!(json.contains("\"hueShift\""));

        let restored = GraphicProfile::from_json(&json).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn from_standings_preserves_order_and_placement_text() {
        let standings = vec![
            StandingEntry { placement: 1, entrant_name: "Alpha".into() },
            StandingEntry { placement: 2, entrant_name: "Beta".into() },
        ];
        let profile = GraphicProfile::from_standings(&standings);

        assert_eq!(profile.entries[0], EntrySettings::new("1", "Alpha", ""));
        assert_eq!(profile.entries[1], EntrySettings::new("2", "Beta", ""));
        assert!(!profile.add_border);
        assert!(profile.filter.is_none());
    }

    #[test]
    fn render_entries_start_without_icons() {
        let profile = GraphicProfile::new().with_entry(EntrySettings::new("1", "Mango", "Falco"));
        let entries = profile.render_entries();
        assert_eq!(entries[0].label(), "1. Mango");
        assert!(entries[0].icon.is_none());
    }

    #[test]
    fn saved_filter_settings_feed_the_engine_params() {
        let params = FilterParams {
            hue_shift: -30.0,
            saturation_adjust: 40.0,
            lightness_adjust: 5.0,
            remove_background: false,
        };
        let profile = GraphicProfile::new().with_filter(params.clone());
        assert_eq!(profile.filter_params(), params);

        // A profile without saved settings yields the no-op defaults.
        assert_eq!(GraphicProfile::new().filter_params(), FilterParams::default());
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let profile =
            GraphicProfile::from_json(r#"{ "entries": [ { "place": "1", "name": "Alpha" } ] }"#)
                .unwrap();
        assert_eq!(profile.entries[0].character, "");
        assert!(!profile.add_border);
        assert!(profile.filter.is_none());
    }
}
