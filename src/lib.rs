// PlanVista calendar core
// Month grid and day timeline derivation plus the terminal renderer

pub mod error;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use error::CalendarError;
