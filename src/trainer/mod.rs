//! Core vocabulary trainer module

pub mod config;
pub mod dict;
pub mod editor;
pub mod error;
pub mod menu;
pub mod session;
pub mod store;
pub mod term;

pub use error::{Result, TrainerError};

/// A proficiency tier in the Leitner scheme. Words start at the lowest
/// level and move up on correct answers, down on incorrect ones.
pub type Level = u32;
