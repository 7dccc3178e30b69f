//! Matkul Core
//!
//! This crate provides the course prerequisite graph ("matkul" = mata kuliah,
//! a university course). It implements:
//!
//! - A directed graph of courses and prerequisite edges
//! - Level assignment (longest prerequisite chain per course)
//! - Leveled listing: grouped by level, alphabetical within a level
//! - The line-oriented command vocabulary used by the `matkul` driver
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `heap`: Binary min-heap used for the per-level buckets
//! - `graph`: Course nodes, the graph itself, and the listing passes
//! - `command`: Command parsing and the session dispatcher
//! - `error`: Error types
//!
//! # Example
//!
//! ```rust
//! use matkul_core::graph::CourseGraph;
//!
//! let mut graph = CourseGraph::new();
//! graph.add_course("A", &[] as &[&str]).unwrap();
//! graph.add_course("B", &[] as &[&str]).unwrap();
//! graph.add_course("C", &["A", "B"]).unwrap();
//! graph.add_course("D", &["C"]).unwrap();
//!
//! assert_eq!(graph.list_sorted().unwrap().join(", "), "A, B, C, D");
//! ```

pub mod command;
pub mod error;
pub mod graph;
pub mod heap;

pub use command::{Command, Outcome, Session};
pub use error::{GraphError, HeapError, ParseError};
pub use graph::{CourseGraph, GraphSnapshot};
pub use heap::MinHeap;
