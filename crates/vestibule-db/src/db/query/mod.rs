pub mod directory;
pub mod registry;
pub mod sequence;
pub mod session;
