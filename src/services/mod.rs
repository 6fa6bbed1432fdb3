// src/services/mod.rs

pub mod composition;
pub mod grading;
pub mod sampling;
pub mod selection;
