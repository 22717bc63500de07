pub mod span;
pub mod token;
