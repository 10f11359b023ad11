pub mod enforcement;
pub mod health;
pub mod operator;
