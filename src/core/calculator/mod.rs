pub mod aggregate;
pub mod target;
