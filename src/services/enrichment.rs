//! Turns remote countries into destination cards.
//!
//! The mapping itself is pure; the decorative rating and review numbers come
//! from a [`DecorationSource`] so callers decide whether they are random.

use crate::models::country::{AppDestination, RemoteCountry};
use rand::Rng;

pub const DEFAULT_DESTINATION_IMAGE: &str =
    "https://images.unsplash.com/photo-1483729558449-99ef09a8c325?w=400&h=300&fit=crop";

/// Country names matched (case-insensitive substring) for the popular list.
pub const POPULAR_COUNTRIES: [&str; 12] = [
    "brazil",
    "spain",
    "japan",
    "france",
    "united states",
    "united kingdom",
    "italy",
    "germany",
    "australia",
    "canada",
    "netherlands",
    "switzerland",
];

pub const MIN_RATING: f64 = 3.5;
pub const MAX_RATING: f64 = 5.0;
pub const MIN_REVIEWS: u32 = 50;
pub const MAX_REVIEWS: u32 = 550;

pub fn country_image(common_name: &str) -> &'static str {
    match common_name {
        "Brazil" => DEFAULT_DESTINATION_IMAGE,
        "Spain" => "https://images.unsplash.com/photo-1539037116277-4db20889f2d4?w=400&h=300&fit=crop",
        "Japan" => "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=400&h=300&fit=crop",
        "France" => "https://images.unsplash.com/photo-1502602898536-47ad22581b52?w=400&h=300&fit=crop",
        "United States" => {
            "https://images.unsplash.com/photo-1501594907352-04cda38ebc29?w=400&h=300&fit=crop"
        }
        "United Kingdom" => {
            "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?w=400&h=300&fit=crop"
        }
        "Italy" => "https://images.unsplash.com/photo-1555992336-03a23c7b20ee?w=400&h=300&fit=crop",
        "Germany" => "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=300&fit=crop",
        "Australia" => {
            "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?w=400&h=300&fit=crop"
        }
        "Canada" => "https://images.unsplash.com/photo-1519832979-6fa011b87667?w=400&h=300&fit=crop",
        _ => DEFAULT_DESTINATION_IMAGE,
    }
}

/// Overlapping names multi-match: "united states" also picks up
/// "United States Minor Outlying Islands".
pub fn is_popular_country(common_name: &str) -> bool {
    let name = common_name.to_lowercase();
    POPULAR_COUNTRIES.iter().any(|popular| name.contains(popular))
}

pub trait DecorationSource: Send + Sync {
    /// Rating in `[MIN_RATING, MAX_RATING]`, one decimal.
    fn rating(&self) -> f64;
    /// Review count in `[MIN_REVIEWS, MAX_REVIEWS)`.
    fn reviews(&self) -> u32;
}

/// Fresh numbers on every call; two fetches of the same country disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDecorations;

impl DecorationSource for RandomDecorations {
    fn rating(&self) -> f64 {
        let raw = rand::rng().random_range(MIN_RATING..=MAX_RATING);
        (raw * 10.0).round() / 10.0
    }

    fn reviews(&self) -> u32 {
        rand::rng().random_range(MIN_REVIEWS..MAX_REVIEWS)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDecorations {
    pub rating: f64,
    pub reviews: u32,
}

impl DecorationSource for FixedDecorations {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn reviews(&self) -> u32 {
        self.reviews
    }
}

pub fn to_destination(country: &RemoteCountry, rating: f64, reviews: u32) -> AppDestination {
    AppDestination {
        id: country.cca3.clone(),
        name: country.display_name().to_string(),
        country: country.name.common.clone(),
        image: country_image(&country.name.common).to_string(),
        rating,
        reviews,
        region: country.region.clone(),
        population: country.population,
        flag: country.flags.png.clone(),
    }
}

pub fn decorate(country: &RemoteCountry, decorations: &dyn DecorationSource) -> AppDestination {
    to_destination(country, decorations.rating(), decorations.reviews())
}

/// Served when the popular-destinations fetch fails.
pub fn fallback_destinations() -> Vec<AppDestination> {
    vec![
        AppDestination {
            id: "BRA".to_string(),
            name: "Rio de Janeiro".to_string(),
            country: "Brazil".to_string(),
            image: country_image("Brazil").to_string(),
            rating: 5.0,
            reviews: 143,
            region: "Americas".to_string(),
            population: 212_559_417,
            flag: "https://flagcdn.com/w320/br.png".to_string(),
        },
        AppDestination {
            id: "ESP".to_string(),
            name: "Barcelona".to_string(),
            country: "Spain".to_string(),
            image: country_image("Spain").to_string(),
            rating: 4.8,
            reviews: 89,
            region: "Europe".to_string(),
            population: 46_754_778,
            flag: "https://flagcdn.com/w320/es.png".to_string(),
        },
        AppDestination {
            id: "JPN".to_string(),
            name: "Tokyo".to_string(),
            country: "Japan".to_string(),
            image: country_image("Japan").to_string(),
            rating: 4.9,
            reviews: 156,
            region: "Asia".to_string(),
            population: 125_836_021,
            flag: "https://flagcdn.com/w320/jp.png".to_string(),
        },
    ]
}
