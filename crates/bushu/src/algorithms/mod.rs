pub mod binarize;
pub mod boundary;
pub mod split;
pub mod postprocess;

pub use binarize::*;
pub use boundary::*;
pub use split::*;
pub use postprocess::*;
