pub mod document;
pub mod generation;
