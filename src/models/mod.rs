pub mod country;
pub mod place;
pub mod preferences;
pub mod response;
