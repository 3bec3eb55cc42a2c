pub mod app;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod editor;
pub mod io;
pub mod logger;
pub mod ops;
pub mod palette;
pub mod project;
