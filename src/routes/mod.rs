pub mod audit;
pub mod health;
pub mod settings;
pub mod testing;
pub mod tools;
