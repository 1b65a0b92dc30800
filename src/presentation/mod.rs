pub mod help;
pub mod views;
