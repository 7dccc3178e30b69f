//! Course Nodes
//!
//! This module defines the node type that lives in the course graph.

use smallvec::SmallVec;

/// Adjacency list of a single course. Most courses have a handful of
/// prerequisites, so short lists stay inline.
pub type Adjacency = SmallVec<[CourseId; 4]>;

/// Stable handle of a course inside its graph.
///
/// Courses are never removed, so the handle is simply the registration
/// index and stays valid for the lifetime of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseId(usize);

impl CourseId {
    /// Get the raw registration index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for CourseId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Traversal mark used while levels are being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet in the current pass.
    #[default]
    Unvisited,

    /// On the traversal stack; its prerequisites are still being resolved.
    InProgress,

    /// Level is final for the current pass.
    Done,
}

/// A course in the prerequisite graph.
#[derive(Debug, Clone)]
pub struct Course {
    /// Unique identifier for this course.
    id: CourseId,

    /// Longest-chain depth, `None` until the first listing pass reaches it.
    level: Option<u32>,

    /// Current traversal mark.
    state: VisitState,

    /// Courses this course depends on ("inside").
    prerequisites: Adjacency,

    /// Courses that depend on this course ("outside").
    dependents: Adjacency,
}

impl Course {
    /// Create a course with no edges and no computed level.
    pub fn new(id: CourseId) -> Self {
        Self {
            id,
            level: None,
            state: VisitState::Unvisited,
            prerequisites: SmallVec::new(),
            dependents: SmallVec::new(),
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Level computed by the last listing pass.
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    pub fn state(&self) -> VisitState {
        self.state
    }

    /// Forget the level and traversal mark of the previous pass.
    pub(crate) fn reset(&mut self) {
        self.level = None;
        self.state = VisitState::Unvisited;
    }

    pub(crate) fn mark(&mut self, state: VisitState) {
        self.state = state;
    }

    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = Some(level);
    }

    /// Direct prerequisites, in the order they were attached.
    pub fn prerequisites(&self) -> &[CourseId] {
        &self.prerequisites
    }

    /// Direct dependents, in the order they were attached.
    pub fn dependents(&self) -> &[CourseId] {
        &self.dependents
    }

    pub(crate) fn add_prerequisite(&mut self, id: CourseId) {
        self.prerequisites.push(id);
    }

    pub(crate) fn add_dependent(&mut self, id: CourseId) {
        self.dependents.push(id);
    }

    /// Remove the first occurrence of `id`. Returns whether one was found.
    pub(crate) fn remove_prerequisite(&mut self, id: CourseId) -> bool {
        remove_first(&mut self.prerequisites, id)
    }

    /// Remove the first occurrence of `id`. Returns whether one was found.
    pub(crate) fn remove_dependent(&mut self, id: CourseId) -> bool {
        remove_first(&mut self.dependents, id)
    }
}

fn remove_first(list: &mut Adjacency, id: CourseId) -> bool {
    match list.iter().position(|&other| other == id) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}
