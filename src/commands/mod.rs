/// Command implementations.
pub mod tablegen;
