pub mod datagen;
pub mod regression;
pub mod risk;

pub use regression::YieldLossModel;
