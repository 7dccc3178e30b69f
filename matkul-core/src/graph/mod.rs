//! Course Prerequisite Graph
//!
//! This module implements the directed graph of courses and the passes that
//! turn it into a leveled listing.
//!
//! # Overview
//!
//! - Nodes are courses, identified by name and addressed internally by a
//!   stable [`CourseId`].
//! - Edges point from a prerequisite to the course that depends on it.
//!
//! Every course stores both directions: its prerequisites ("inside") and its
//! dependents ("outside"). The graph keeps the two lists mirrored under every
//! mutation.
//!
//! A listing request runs two passes over the graph:
//!
//! 1. [`LevelAssigner`] recomputes each course's level from scratch.
//! 2. [`LeveledSorter`] buckets courses by level and drains each bucket in
//!    name order.

mod course_graph;
mod level;
mod node;
mod sorter;

pub use course_graph::{CourseGraph, CourseSnapshot, GraphSnapshot};
pub use level::LevelAssigner;
pub use node::{Course, CourseId, VisitState};
pub use sorter::LeveledSorter;
