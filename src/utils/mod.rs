// Utility modules shared by the builders and the renderer

pub mod date;
