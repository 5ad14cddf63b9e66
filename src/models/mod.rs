pub mod stats;
pub mod url;
pub mod visit;
