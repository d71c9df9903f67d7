//! Match record storage seam.
//!
//! The surrounding application owns durable state. This module defines the
//! operations the engine needs from it and an in-memory store used by the
//! command line tool and tests.

pub mod repository;

pub use repository::{InMemoryMatchRepository, MatchRepository};
