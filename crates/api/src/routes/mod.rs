pub mod health;
pub mod queries;
