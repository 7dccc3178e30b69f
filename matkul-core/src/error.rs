//! Error Types
//!
//! Every graph mutation is validated before it touches any state, so an
//! error from this crate always means the graph is exactly as it was before
//! the call.

use thiserror::Error;

/// Errors reported by [`CourseGraph`](crate::graph::CourseGraph) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A course with this name is already registered.
    #[error("course already exists: {name}")]
    AlreadyExists { name: String },

    /// The course being edited is not registered.
    #[error("course not found: {name}")]
    NotFound { name: String },

    /// A prerequisite names a course that is not registered.
    #[error("prerequisite not found: {name}")]
    PrerequisiteNotFound { name: String },

    /// The requested prerequisites would make a course depend on itself.
    ///
    /// `path` starts and ends with the same course.
    #[error("dependency cycle detected: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// A level bucket was drained past its end.
    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Errors reported by [`MinHeap`](crate::heap::MinHeap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("attempted to pop an empty heap")]
    Empty,
}

/// Errors reported while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command: {keyword}")]
    UnknownCommand { keyword: String },

    #[error("{keyword} requires a course name")]
    MissingCourseName { keyword: String },
}
