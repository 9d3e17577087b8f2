pub mod error;
pub mod library;
pub mod selectors;

#[cfg(test)]
mod library_tests;

pub use error::*;
pub use library::*;
pub use selectors::*;
