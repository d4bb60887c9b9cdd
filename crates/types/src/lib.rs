//! Foundation types for Relay authoring assistance.
//!
//! This crate provides shared types used across the workspace.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **File types**: [`Language`]
//! - **Position types**: [`Position`], [`Range`], [`OffsetRange`], [`RegionPosition`]
//! - **Edit types**: [`TextEdit`], [`NewFile`]

mod edits;
mod file;
mod position;

pub use edits::{NewFile, TextEdit};
pub use file::Language;
pub use position::{OffsetRange, Position, Range, RegionPosition};
