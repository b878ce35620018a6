//! Selectable data sources

use serde::{Deserialize, Serialize};

/// Where the bundled source list is published
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/kevh182/Redump_GameID/main/";

/// A pre-registered data source: file identifier plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,
}

impl DataSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The GameID lists shipped as the default configuration
pub fn default_sources() -> Vec<DataSource> {
    [
        ("Microsoft_Xbox_Redump_GameID_List.csv", "Microsoft Xbox"),
        ("Nintendo_64_No-Intro_GameID.csv", "Nintendo 64"),
        ("Nintendo_GameCube_Redump_GameID_List.csv", "Nintendo GameCube"),
        ("Nintendo_Wii_Redump_GameID_List.csv", "Nintendo Wii"),
        ("Panasonic_3DO_Redump_GameID_List.csv", "The 3D0 Company"),
        ("Sega_Dreamcast_Redump_GameID_List.csv", "Sega Dreamcast"),
        ("Sega_Mega_CD_Redump_GameID_List.csv", "Sega CD / Mega CD"),
        ("Sega_MegaDrive_Genesis_No-Intro_GameID.csv", "Sega Genesis/Mega Drive"),
        ("Sega_Saturn_Redump_GameID_List.csv", "Sega Saturn"),
        ("Sony_Playstation_Redump_GameID_List.csv", "Sony PlayStation"),
        ("Sony_Playstation_2_Redump_GameID_List.csv", "Sony PlayStation 2"),
        (
            "Sony_Playstation_Portable_Redump_GameID_List.csv",
            "Sony PlayStation Portable (PSP)",
        ),
    ]
    .into_iter()
    .map(|(id, name)| DataSource::new(id, name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_sources_are_unique_csv_files() {
        let sources = default_sources();
        assert_eq!(sources.len(), 12);

        let ids: HashSet<&str> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), sources.len());
        assert!(sources.iter().all(|s| s.id.ends_with(".csv")));
        assert_eq!(sources[0].name, "Microsoft Xbox");
    }
}
