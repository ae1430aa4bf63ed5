//! # voctrain
//!
//! A personal vocabulary trainer. Words live as plain text files in
//! one directory per Leitner level; reviewing a level shows each word,
//! flips it over on Enter, and promotes or demotes it depending on the
//! answer. New words are seeded from a Ding-format bilingual
//! dictionary and start at the lowest level.
//!
//! The library exposes the three pillars separately so they can be
//! used without the interactive session: [`LevelStore`] for the file
//! tree, [`Dictionary`] for lookups, and [`Menu`] for single-keystroke
//! prompts. [`Session`] ties them together over a [`Console`].

pub mod trainer;

// Re-export the main types for convenience
pub use trainer::{
    config::Config,
    dict::{find_entries, Dictionary},
    menu::{Flow, Menu},
    session::Session,
    store::{LevelStore, WriteMode},
    term::{Console, Terminal},
    Level, Result, TrainerError,
};
