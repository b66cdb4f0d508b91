//! Main module for yarn lockfile functionality

pub mod error;
pub mod lexing;
pub mod loader;
pub mod lockfile;
pub mod package;
pub mod parsing;
pub mod serializer;
pub mod testing;
pub mod value;
