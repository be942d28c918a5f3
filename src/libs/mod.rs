pub mod align;
pub mod cluster;
pub mod config;
pub mod error;
pub mod io;
pub mod pairs;
pub mod seq;
pub mod table;
pub mod translate;

pub use error::TracError;
