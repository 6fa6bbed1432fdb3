// src/repo/mod.rs

pub mod category;
pub mod exam;
pub mod question;
