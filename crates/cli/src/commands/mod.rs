//! CLI Commands

pub mod render;
pub mod smoke;
pub mod summary;
