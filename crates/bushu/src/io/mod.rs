pub mod catalog_file;
pub mod png;

pub use catalog_file::*;
pub use png::*;
