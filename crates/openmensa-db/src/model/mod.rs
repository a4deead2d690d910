pub mod meal;
pub mod token;
pub mod user;
