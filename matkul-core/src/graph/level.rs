//! Level Assignment
//!
//! A course's level is the length of the longest prerequisite chain that
//! ends in it:
//!
//! ```text
//! level(v) = 1 + max(level(p) for p in prerequisites(v))    (1 if none)
//! ```
//!
//! # Algorithm
//!
//! Memoized depth-first search over the prerequisite ("inside") edges:
//!
//! 1. Reset every course to `Unvisited` with no level.
//! 2. Walk the courses in registration order and start a search from each
//!    one that is still unvisited.
//! 3. A course is `InProgress` while its prerequisites are being resolved.
//!    Once all of them are `Done` its level is computed from theirs and it
//!    becomes `Done` itself.
//!
//! A level is only written after every prerequisite level is final, so a
//! course reachable through chains of different length (a diamond) always
//! gets the longest one. The search keeps its own stack instead of
//! recursing, so long chains cannot overflow the call stack.

use tracing::{debug, trace};

use super::course_graph::CourseGraph;
use super::node::{CourseId, VisitState};
use crate::error::GraphError;

/// Recomputes the level of every course in a graph.
pub struct LevelAssigner;

impl LevelAssigner {
    /// Assign levels to all courses and return the highest level, or 0 for
    /// an empty graph.
    ///
    /// Reaching a course that is still in progress means the graph has a
    /// cycle. Validated mutations never create one, but the pass reports
    /// [`GraphError::CycleDetected`] instead of looping if it happens.
    pub fn assign(graph: &mut CourseGraph) -> Result<u32, GraphError> {
        for course in graph.courses_mut() {
            course.reset();
        }

        let mut max_level: u32 = 0;
        // Each frame holds a course and the next prerequisite to inspect.
        let mut stack: Vec<(CourseId, usize)> = Vec::new();

        for start in (0..graph.len()).map(CourseId::from) {
            if graph.node(start).state() != VisitState::Unvisited {
                continue;
            }

            graph.node_mut(start).mark(VisitState::InProgress);
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (current, cursor) = *frame;
                match graph.node(current).prerequisites().get(cursor).copied() {
                    Some(prereq) => {
                        frame.1 += 1;
                        match graph.node(prereq).state() {
                            VisitState::Unvisited => {
                                trace!(
                                    course = graph.name(current),
                                    prerequisite = graph.name(prereq),
                                    "descending"
                                );
                                graph.node_mut(prereq).mark(VisitState::InProgress);
                                stack.push((prereq, 0));
                            }
                            VisitState::InProgress => {
                                return Err(Self::cycle(graph, &stack, prereq));
                            }
                            VisitState::Done => {}
                        }
                    }
                    None => {
                        let level = Self::level_from_prerequisites(graph, current);
                        let course = graph.node_mut(current);
                        course.set_level(level);
                        course.mark(VisitState::Done);
                        max_level = max_level.max(level);
                        stack.pop();
                    }
                }
            }
        }

        debug!(courses = graph.len(), max_level, "assigned levels");
        Ok(max_level)
    }

    fn level_from_prerequisites(graph: &CourseGraph, id: CourseId) -> u32 {
        let deepest = graph
            .node(id)
            .prerequisites()
            .iter()
            .filter_map(|&prereq| graph.node(prereq).level())
            .max()
            .unwrap_or(0);
        deepest + 1
    }

    /// Build the cycle path in prerequisite -> dependent order. Frames above
    /// `reentered` on the stack are each a prerequisite of the frame below.
    fn cycle(graph: &CourseGraph, stack: &[(CourseId, usize)], reentered: CourseId) -> GraphError {
        let start = stack
            .iter()
            .position(|&(id, _)| id == reentered)
            .unwrap_or(0);
        let mut path: Vec<String> = stack[start..]
            .iter()
            .rev()
            .map(|&(id, _)| graph.name(id).to_string())
            .collect();
        if let Some(first) = path.first().cloned() {
            path.push(first);
        }
        GraphError::CycleDetected { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    fn levels(graph: &CourseGraph) -> Vec<(String, Option<u32>)> {
        graph
            .iter()
            .map(|(name, course)| (name.to_string(), course.level()))
            .collect()
    }

    #[test]
    fn empty_graph_has_no_levels() {
        let mut graph = CourseGraph::new();
        assert_eq!(LevelAssigner::assign(&mut graph), Ok(0));
    }

    #[test]
    fn roots_are_level_one() {
        let mut graph = CourseGraph::new();
        graph.add_course("X", NONE).unwrap();
        graph.add_course("Y", NONE).unwrap();

        assert_eq!(LevelAssigner::assign(&mut graph), Ok(1));
        assert_eq!(graph.level_of("X"), Some(1));
        assert_eq!(graph.level_of("Y"), Some(1));
    }

    #[test]
    fn chain_levels_follow_depth() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", NONE).unwrap();
        graph.add_course("C", &["A", "B"]).unwrap();
        graph.add_course("D", &["C"]).unwrap();

        assert_eq!(LevelAssigner::assign(&mut graph), Ok(3));
        assert_eq!(
            levels(&graph),
            vec![
                ("A".to_string(), Some(1)),
                ("B".to_string(), Some(1)),
                ("C".to_string(), Some(2)),
                ("D".to_string(), Some(3)),
            ]
        );
    }

    #[test]
    fn diamond_takes_longest_chain() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", &["A"]).unwrap();
        graph.add_course("C", &["B"]).unwrap();
        // D is reachable from A directly and through B -> C.
        graph.add_course("D", &["A", "C"]).unwrap();

        LevelAssigner::assign(&mut graph).unwrap();
        assert_eq!(graph.level_of("D"), Some(4));
    }

    #[test]
    fn registration_order_does_not_matter() {
        // P is registered first but ends up deepest in the chain.
        let mut graph = CourseGraph::new();
        graph.add_course("P", NONE).unwrap();
        graph.add_course("Q", NONE).unwrap();
        graph.add_course("R", NONE).unwrap();
        graph.edit_course("P", &["Q"]).unwrap();
        graph.edit_course("Q", &["R"]).unwrap();

        LevelAssigner::assign(&mut graph).unwrap();
        assert_eq!(graph.level_of("R"), Some(1));
        assert_eq!(graph.level_of("Q"), Some(2));
        assert_eq!(graph.level_of("P"), Some(3));
    }

    #[test]
    fn levels_are_recomputed_from_scratch() {
        let mut graph = CourseGraph::new();
        graph.add_course("A", NONE).unwrap();
        graph.add_course("B", &["A"]).unwrap();
        LevelAssigner::assign(&mut graph).unwrap();
        assert_eq!(graph.level_of("B"), Some(2));

        graph.edit_course("B", NONE).unwrap();
        LevelAssigner::assign(&mut graph).unwrap();
        assert_eq!(graph.level_of("B"), Some(1));
    }

    #[test]
    fn unchecked_cycle_is_reported() {
        let mut graph = CourseGraph::new();
        let a = graph.add_vertex("A");
        let b = graph.add_vertex("B");
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        let err = LevelAssigner::assign(&mut graph).unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                path: vec!["B".into(), "A".into(), "B".into()],
            }
        );
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        // C0 depends on C1, which depends on C2, and so on. C0 is registered
        // first, so the search has to descend through the whole chain.
        let depth = 20_000;
        let mut graph = CourseGraph::new();
        let ids: Vec<CourseId> = (0..depth)
            .map(|i| graph.add_vertex(format!("C{}", i)))
            .collect();
        for pair in ids.windows(2) {
            graph.add_edge(pair[1], pair[0]);
        }

        assert_eq!(LevelAssigner::assign(&mut graph), Ok(depth as u32));
        assert_eq!(graph.level_of("C0"), Some(depth as u32));
        assert_eq!(graph.level_of(&format!("C{}", depth - 1)), Some(1));
    }
}
