pub mod data_source;
pub mod department_map;
pub mod downloads;
pub mod estimation_view;
pub mod filters;
pub mod notifications;
pub mod scenario;
