// src/handlers/mod.rs

pub mod category;
pub mod exam;
pub mod grading;
pub mod meta;
pub mod question;
pub mod seed;
pub mod test;
