pub mod model;
pub mod types;

pub use model::ViewModel;
pub use types::{SortDirection, SortField, SortState};
