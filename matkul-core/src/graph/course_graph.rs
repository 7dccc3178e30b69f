//! Course Graph
//!
//! The graph owns every course and keeps the two adjacency indexes
//! ("inside" = prerequisites, "outside" = dependents) as mirror images of
//! each other.
//!
//! # Validation
//!
//! `add_course` and `edit_course` check every name before they touch any
//! state. A rejected call leaves the graph exactly as it was, so there is
//! nothing to roll back.
//!
//! The low-level `add_vertex`, `add_edge` and `remove_edge` perform no
//! validation of their own.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use super::level::LevelAssigner;
use super::node::{Course, CourseId};
use super::sorter::LeveledSorter;
use crate::error::GraphError;

/// Directed graph of courses and their prerequisite edges.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    /// All courses keyed by name, in registration order. The position of a
    /// course in this map is its [`CourseId`].
    courses: IndexMap<String, Course>,
}

/// Diagnostic view of one course and both of its adjacency lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSnapshot {
    pub name: String,
    pub level: Option<u32>,
    pub prerequisites: Vec<String>,
    pub dependents: Vec<String>,
}

/// Diagnostic view of the whole graph, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub courses: Vec<CourseSnapshot>,
}

impl CourseGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            courses: IndexMap::new(),
        }
    }

    /// Get the total number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Total number of prerequisite edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.courses
            .values()
            .map(|course| course.prerequisites().len())
            .sum()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.courses.contains_key(name)
    }

    /// Look up the handle of a registered course.
    pub fn lookup(&self, name: &str) -> Option<CourseId> {
        self.courses.get_index_of(name).map(CourseId::from)
    }

    /// Get a reference to a course.
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.courses.get_index(id.index()).map(|(_, course)| course)
    }

    /// Name of a course, or `""` for a handle from another graph.
    pub fn name(&self, id: CourseId) -> &str {
        self.courses
            .get_index(id.index())
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    /// Iterate over `(name, course)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Course)> {
        self.courses
            .iter()
            .map(|(name, course)| (name.as_str(), course))
    }

    pub(crate) fn courses_mut(&mut self) -> impl Iterator<Item = &mut Course> {
        self.courses.values_mut()
    }

    // Internal handles always come from this graph.
    pub(crate) fn node(&self, id: CourseId) -> &Course {
        &self.courses[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: CourseId) -> &mut Course {
        &mut self.courses[id.index()]
    }

    /// Register a course with no edges.
    ///
    /// Registering an existing name returns its current handle and leaves
    /// the course untouched.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> CourseId {
        match self.courses.entry(name.into()) {
            Entry::Occupied(entry) => CourseId::from(entry.index()),
            Entry::Vacant(entry) => {
                let id = CourseId::from(entry.index());
                debug!(course = %entry.key(), index = id.index(), "registered course");
                entry.insert(Course::new(id));
                id
            }
        }
    }

    /// Add an edge: `target` depends on `source`.
    ///
    /// Duplicate edges are not checked for.
    pub fn add_edge(&mut self, source: CourseId, target: CourseId) {
        if let Some((_, course)) = self.courses.get_index_mut(source.index()) {
            course.add_dependent(target);
        }
        if let Some((_, course)) = self.courses.get_index_mut(target.index()) {
            course.add_prerequisite(source);
        }
    }

    /// Remove the first `source -> target` edge. Does nothing if there is
    /// no such edge.
    pub fn remove_edge(&mut self, source: CourseId, target: CourseId) {
        if let Some((_, course)) = self.courses.get_index_mut(source.index()) {
            course.remove_dependent(target);
        }
        if let Some((_, course)) = self.courses.get_index_mut(target.index()) {
            course.remove_prerequisite(source);
        }
    }

    /// Register a new course that depends on `prerequisites`.
    pub fn add_course<S: AsRef<str>>(
        &mut self,
        name: &str,
        prerequisites: &[S],
    ) -> Result<CourseId, GraphError> {
        if self.contains(name) {
            warn!(course = name, "course already exists");
            return Err(GraphError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let prerequisites = self.resolve(prerequisites)?;

        let id = self.add_vertex(name);
        for &prereq in &prerequisites {
            self.add_edge(prereq, id);
        }

        debug!(
            course = name,
            prerequisites = prerequisites.len(),
            "added course"
        );
        Ok(id)
    }

    /// Replace the full prerequisite set of an existing course.
    pub fn edit_course<S: AsRef<str>>(
        &mut self,
        name: &str,
        prerequisites: &[S],
    ) -> Result<(), GraphError> {
        let Some(id) = self.lookup(name) else {
            warn!(course = name, "course not found");
            return Err(GraphError::NotFound {
                name: name.to_string(),
            });
        };
        let prerequisites = self.resolve(prerequisites)?;

        for &prereq in &prerequisites {
            if let Some(path) = self.path_between(id, prereq) {
                let mut path: Vec<String> =
                    path.into_iter().map(|p| self.name(p).to_string()).collect();
                path.push(name.to_string());
                warn!(course = name, cycle = ?path, "rejected cyclic prerequisite");
                return Err(GraphError::CycleDetected { path });
            }
        }

        let previous: Vec<CourseId> = self.node(id).prerequisites().to_vec();
        for &prereq in &previous {
            self.remove_edge(prereq, id);
        }
        for &prereq in &prerequisites {
            self.add_edge(prereq, id);
        }

        debug!(
            course = name,
            removed = previous.len(),
            added = prerequisites.len(),
            "edited course"
        );
        Ok(())
    }

    /// Recompute every level and return course names grouped by level,
    /// alphabetical within each level.
    pub fn list_sorted(&mut self) -> Result<Vec<String>, GraphError> {
        LevelAssigner::assign(self)?;
        LeveledSorter::sort(self)
    }

    /// Level from the most recent listing pass.
    pub fn level_of(&self, name: &str) -> Option<u32> {
        self.courses.get(name).and_then(Course::level)
    }

    /// Names of the direct prerequisites of `name`.
    pub fn prerequisites_of(&self, name: &str) -> Option<Vec<&str>> {
        let course = self.courses.get(name)?;
        Some(self.names(course.prerequisites()))
    }

    /// Names of the courses that directly depend on `name`.
    pub fn dependents_of(&self, name: &str) -> Option<Vec<&str>> {
        let course = self.courses.get(name)?;
        Some(self.names(course.dependents()))
    }

    /// Snapshot both adjacency indexes for debugging.
    pub fn dump_state(&self) -> GraphSnapshot {
        let courses = self
            .courses
            .iter()
            .map(|(name, course)| CourseSnapshot {
                name: name.clone(),
                level: course.level(),
                prerequisites: self.owned_names(course.prerequisites()),
                dependents: self.owned_names(course.dependents()),
            })
            .collect();

        GraphSnapshot { courses }
    }

    fn names(&self, ids: &[CourseId]) -> Vec<&str> {
        ids.iter().map(|&id| self.name(id)).collect()
    }

    fn owned_names(&self, ids: &[CourseId]) -> Vec<String> {
        ids.iter().map(|&id| self.name(id).to_string()).collect()
    }

    /// Resolve every name or report the first one that is missing.
    fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<CourseId>, GraphError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.lookup(name).ok_or_else(|| {
                    warn!(prerequisite = name, "prerequisite not found");
                    GraphError::PrerequisiteNotFound {
                        name: name.to_string(),
                    }
                })
            })
            .collect()
    }

    /// Find a chain of dependent edges leading from `from` to `to`.
    ///
    /// The returned path starts with `from` and ends with `to`. Adding the
    /// edge `to -> from` on top of such a path would close a cycle.
    fn path_between(&self, from: CourseId, to: CourseId) -> Option<Vec<CourseId>> {
        if from == to {
            return Some(vec![from]);
        }

        let mut seen = vec![false; self.courses.len()];
        // Each frame holds a course and the next dependent to try.
        let mut stack: Vec<(CourseId, usize)> = vec![(from, 0)];
        seen[from.index()] = true;

        while let Some(frame) = stack.last_mut() {
            let (current, cursor) = *frame;
            match self.node(current).dependents().get(cursor).copied() {
                Some(next) => {
                    frame.1 += 1;
                    if next == to {
                        let mut path: Vec<CourseId> = stack.iter().map(|&(id, _)| id).collect();
                        path.push(to);
                        return Some(path);
                    }
                    if !seen[next.index()] {
                        seen[next.index()] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    /// Checks that every edge appears in both indexes with equal multiplicity.
    fn assert_mirrored(graph: &CourseGraph) {
        for (_, course) in graph.iter() {
            for &prereq in course.prerequisites() {
                let forward = course
                    .prerequisites()
                    .iter()
                    .filter(|&&p| p == prereq)
                    .count();
                let backward = graph
                    .node(prereq)
                    .dependents()
                    .iter()
                    .filter(|&&d| d == course.id())
                    .count();
                assert_eq!(forward, backward);
            }
        }
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = CourseGraph::new();
        let a = graph.add_vertex("A");
        let again = graph.add_vertex("A");
        let b = graph.add_vertex("B");

        assert_eq!(a, again);
        assert_eq!(b.index(), 1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.name(b), "B");
    }

    #[test]
    fn add_and_remove_edges() {
        let mut graph = CourseGraph::new();
        let a = graph.add_vertex("A");
        let b = graph.add_vertex("B");

        graph.add_edge(a, b);
        assert_eq!(graph.dependents_of("A"), Some(vec!["B"]));
        assert_eq!(graph.prerequisites_of("B"), Some(vec!["A"]));
        assert_mirrored(&graph);

        graph.remove_edge(a, b);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.dependents_of("A"), Some(vec![]));

        // Removing a missing edge is a no-op.
        graph.remove_edge(a, b);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_course_rejects_duplicates() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();

        let err = graph.add_course("A", NONE).unwrap_err();
        assert_eq!(err, GraphError::AlreadyExists { name: "A".into() });
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn add_course_with_missing_prerequisite_changes_nothing() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();

        let err = graph.add_course("C", &["A", "B"]).unwrap_err();
        assert_eq!(err, GraphError::PrerequisiteNotFound { name: "B".into() });
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains("C"));
    }

    #[test]
    fn edit_course_replaces_prerequisites() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", NONE).unwrap();
        graph.add_course("C", &["A"]).unwrap();

        graph.edit_course("C", &["B"]).unwrap();
        assert_eq!(graph.prerequisites_of("C"), Some(vec!["B"]));
        assert_eq!(graph.dependents_of("A"), Some(vec![]));
        assert_eq!(graph.dependents_of("B"), Some(vec!["C"]));
        assert_mirrored(&graph);

        graph.edit_course("C", &["A", "B"]).unwrap();
        assert_eq!(graph.prerequisites_of("C"), Some(vec!["A", "B"]));
        assert_eq!(graph.edge_count(), 2);
        assert_mirrored(&graph);
    }

    #[test]
    fn edit_course_validates_before_mutating() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", &["A"]).unwrap();

        let err = graph.edit_course("Z", NONE).unwrap_err();
        assert_eq!(err, GraphError::NotFound { name: "Z".into() });

        let err = graph.edit_course("B", &["Q"]).unwrap_err();
        assert_eq!(err, GraphError::PrerequisiteNotFound { name: "Q".into() });
        assert_eq!(graph.prerequisites_of("B"), Some(vec!["A"]));
    }

    #[test]
    fn edit_course_rejects_cycles() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", &["A"]).unwrap();
        graph.add_course("C", &["B"]).unwrap();

        let err = graph.edit_course("A", &["C"]).unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                path: vec!["A".into(), "B".into(), "C".into(), "A".into()],
            }
        );
        assert_eq!(graph.prerequisites_of("A"), Some(vec![]));
        assert_eq!(graph.edge_count(), 2);

        let err = graph.edit_course("B", &["B"]).unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                path: vec!["B".into(), "B".into()],
            }
        );
    }

    #[test]
    fn dump_state_lists_both_indexes() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", &["A"]).unwrap();

        let snapshot = graph.dump_state();
        assert_eq!(snapshot.courses.len(), 2);
        assert_eq!(snapshot.courses[0].name, "A");
        assert_eq!(snapshot.courses[0].dependents, vec!["B".to_string()]);
        assert_eq!(snapshot.courses[1].prerequisites, vec!["A".to_string()]);
        assert_eq!(snapshot.courses[1].level, None);
    }
}
