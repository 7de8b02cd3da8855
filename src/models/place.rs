use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub source: String,
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikipediaExtract {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub html: Option<String>,
}

/// Popularity signal. Radius results carry a number, detail lookups may
/// carry a label such as `"3h"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceRate {
    Score(f64),
    Label(String),
}

/// A point of interest from the points-of-interest API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub xid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rate: Option<PlaceRate>,
    #[serde(default)]
    pub osm: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    #[serde(default)]
    pub kinds: String,
    pub point: GeoPoint,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
    #[serde(default)]
    pub dist: Option<f64>,
    #[serde(default)]
    pub preview: Option<Preview>,
    #[serde(default)]
    pub wikipedia_extracts: Option<WikipediaExtract>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSources {
    pub geometry: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
}

/// Single-place lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(flatten)]
    pub place: Place,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub otm: Option<String>,
    #[serde(default)]
    pub sources: Option<PlaceSources>,
    #[serde(default)]
    pub address: Option<PlaceAddress>,
}

/// Radius results wrapped as `{ "type", "features": [place, ..] }`, with each
/// feature already in flat place form rather than GeoJSON
/// `geometry`/`properties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesEnvelope {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Place>,
}

/// Body of a radius search. The envelope form is the one this service is
/// built around; `format=json` on the live API answers with a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RadiusResponse {
    Envelope(PlacesEnvelope),
    List(Vec<Place>),
}

impl RadiusResponse {
    pub fn into_places(self) -> Vec<Place> {
        match self {
            Self::Envelope(envelope) => envelope.features,
            Self::List(places) => places,
        }
    }
}

/// One city of the popular-places aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPlaces {
    pub city: String,
    pub places: Vec<Place>,
}
