// Model exports

pub mod cursor;
pub mod event;
pub mod settings;
