// Service exports

pub mod calendar;
pub mod day_timeline;
pub mod detail;
pub mod event_store;
pub mod month_grid;
pub mod navigation;
pub mod remote;
pub mod settings;
