pub mod batch;
pub mod classifier;
pub mod keywords;
pub mod normalize;
