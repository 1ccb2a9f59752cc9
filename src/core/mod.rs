pub mod aggregation;
pub mod codes;
pub mod departments;
pub mod estimator;
pub mod presets;
pub mod records;
pub mod store;
