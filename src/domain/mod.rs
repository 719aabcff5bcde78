pub mod cell;
pub mod grid;
pub mod path;
pub mod rules;
