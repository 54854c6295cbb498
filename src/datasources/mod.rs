pub mod district_weather;
pub mod varieties;

pub use district_weather::{current_weather, district_baseline, DISTRICTS};
pub use varieties::{crop_factor, variety_recommendations, CROPS};
