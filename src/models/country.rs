use serde::{Deserialize, Serialize};

/// A country as returned by the countries lookup API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCountry {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    pub region: String,
    pub population: u64,
    pub flags: CountryFlags,
    pub cca3: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryFlags {
    pub png: String,
    #[serde(default)]
    pub svg: Option<String>,
}

impl RemoteCountry {
    /// First listed capital, or the common name for countries without one.
    pub fn display_name(&self) -> &str {
        self.capital
            .as_ref()
            .and_then(|capitals| capitals.first())
            .map(String::as_str)
            .unwrap_or(&self.name.common)
    }
}

/// Destination card shown by the app, derived from a [`RemoteCountry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDestination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub image: String,
    pub rating: f64,
    pub reviews: u32,
    pub region: String,
    pub population: u64,
    pub flag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_country_without_capital() {
        let json = r#"{
            "name": { "common": "Antarctica", "official": "Antarctica" },
            "region": "Antarctic",
            "population": 1000,
            "flags": { "png": "https://flagcdn.com/w320/aq.png" },
            "cca3": "ATA"
        }"#;

        let country: RemoteCountry = serde_json::from_str(json).unwrap();
        assert!(country.capital.is_none());
        assert_eq!(country.display_name(), "Antarctica");
    }

    #[test]
    fn test_display_name_prefers_first_capital() {
        let json = r#"{
            "name": { "common": "South Africa" },
            "capital": ["Pretoria", "Bloemfontein", "Cape Town"],
            "region": "Africa",
            "population": 59308690,
            "flags": { "png": "https://flagcdn.com/w320/za.png" },
            "cca3": "ZAF"
        }"#;

        let country: RemoteCountry = serde_json::from_str(json).unwrap();
        assert_eq!(country.display_name(), "Pretoria");
    }

    #[test]
    fn test_empty_capital_list_falls_back_to_name() {
        let json = r#"{
            "name": { "common": "Macau" },
            "capital": [],
            "region": "Asia",
            "population": 649342,
            "flags": { "png": "https://flagcdn.com/w320/mo.png" },
            "cca3": "MAC"
        }"#;

        let country: RemoteCountry = serde_json::from_str(json).unwrap();
        assert_eq!(country.display_name(), "Macau");
    }
}
