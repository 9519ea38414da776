pub mod directory;
pub mod registry;
pub mod staff;
