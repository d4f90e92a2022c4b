// Data models (structs)
pub mod array;
pub mod beam;
pub mod mixer;
pub mod settings;

pub use array::*;
pub use beam::*;
pub use mixer::*;
pub use settings::*;
