pub mod account;
pub mod greeter;
pub mod health;
