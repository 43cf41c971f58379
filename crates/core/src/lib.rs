//! Core library for mdedit
//!
//! This crate implements the **Functional Core** of the mdedit application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The mdedit project uses a two-crate architecture:
//!
//! - **`mdedit_core`** (this crate): Pure transformation functions with zero I/O
//! - **`mdedit`**: File access, the HTTP server, and browser launching (the Imperative Shell)
//!
//! Nothing in this crate reads files, talks to the network, or asks which
//! platform it runs on. The platform's preferred line ending is passed in by
//! the caller.
//!
//! # Module Organization
//!
//! - [`eol`]: Line-ending registry, detection, and conversion
//! - [`editor`]: The edit view model and the decision of what to write on save
//! - [`page`]: HTML rendering and edit URLs
//!
//! # Example Usage
//!
//! ```rust
//! use mdedit_core::eol::{convert, detect_with_default, LineEnding};
//!
//! let text = "a\r\nb\nc\rd";
//! assert_eq!(convert(text, 1).unwrap(), "a\nb\nc\nd");
//! assert_eq!(detect_with_default("hello", LineEnding::Lf), LineEnding::Lf);
//! ```

pub mod editor;
pub mod eol;
pub mod page;
