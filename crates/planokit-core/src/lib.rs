//! # PlanoKit Core
//!
//! Core types and utilities for PlanoKit.
//! Provides the error hierarchy, canvas geometry primitives, layout
//! constants, and the session-wide id generator.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod ids;

pub use error::{Error, LayoutError, Result, SessionError, TemplateError};
pub use geometry::{clamp_into, Point, Size};
pub use ids::IdGenerator;
