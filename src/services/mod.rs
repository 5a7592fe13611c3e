pub mod forms;
pub mod meal;
pub mod roster;
pub mod session;
pub mod validation;
pub mod weight;
