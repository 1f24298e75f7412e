//! Entity lookup adapters.

mod directory;

pub use directory::DirectoryEntityLookup;
