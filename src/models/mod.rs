pub mod form;
pub mod meal;
pub mod session;
pub mod weight;
