//! Leveled Sorting
//!
//! Groups courses into one bucket per level and drains every bucket in name
//! order. Buckets are [`MinHeap`]s indexed by `level - 1`.

use tracing::{trace, warn};

use super::course_graph::CourseGraph;
use crate::error::GraphError;
use crate::heap::MinHeap;

/// Orders courses by level, then by name.
pub struct LeveledSorter;

impl LeveledSorter {
    /// Names of every leveled course, grouped by ascending level and
    /// alphabetical within a level.
    ///
    /// Levels must already be assigned (see
    /// [`LevelAssigner`](super::LevelAssigner)). Courses without a level
    /// are left out.
    pub fn sort(graph: &CourseGraph) -> Result<Vec<String>, GraphError> {
        Ok(Self::buckets(graph)?.into_iter().flatten().collect())
    }

    /// Like [`LeveledSorter::sort`], but keeps one group per level.
    pub fn buckets(graph: &CourseGraph) -> Result<Vec<Vec<String>>, GraphError> {
        let mut heaps: Vec<MinHeap<&str>> = Vec::new();

        for (name, course) in graph.iter() {
            let Some(level) = course.level() else {
                warn!(course = name, "course has no level, skipping");
                continue;
            };
            let slot = level.saturating_sub(1) as usize;
            while heaps.len() <= slot {
                heaps.push(MinHeap::new());
            }
            heaps[slot].insert(name);
        }

        let mut buckets = Vec::with_capacity(heaps.len());
        for (slot, mut heap) in heaps.into_iter().enumerate() {
            let mut bucket = Vec::with_capacity(heap.len());
            while !heap.is_empty() {
                bucket.push(heap.extract_min()?.to_string());
            }
            trace!(level = slot + 1, courses = bucket.len(), "drained bucket");
            buckets.push(bucket);
        }

        Ok(buckets)
    }
}
