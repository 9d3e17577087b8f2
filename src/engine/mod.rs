pub mod attribute;
pub mod progress;
pub mod search;
pub mod sort;


pub use attribute::*;
pub use progress::*;
pub use search::*;
pub use sort::*;
