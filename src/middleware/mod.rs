pub mod json;
pub mod session;
