pub mod day_view;
pub mod detail_view;
pub mod month_view;
