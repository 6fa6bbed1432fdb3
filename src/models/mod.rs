// src/models/mod.rs

pub mod category;
pub mod exam;
pub mod grading;
pub mod question;
