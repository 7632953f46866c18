// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The nested timer tree.

use serde::{Deserialize, Serialize};

use crate::stats::{Statistic, StatisticSnapshot};
use crate::timer::stopwatch::Stopwatch;

/// Handle to one node of a [`Timer`] tree.
///
/// Ids are plain indices into the tree that created them: they are `Copy`,
/// never dangle while the tree is alive, and stay valid across
/// [`Timer::reset`]. An id is only meaningful for its own tree — indexing a
/// different tree with it is a precondition violation and panics on
/// out-of-bounds access rather than silently touching another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(usize);

#[derive(Debug, Clone)]
struct TimerNode {
    stats: Statistic,
    watch: Stopwatch,
    children: Vec<usize>,
}

impl TimerNode {
    fn new(label: String) -> Self {
        Self {
            stats: Statistic::new(label),
            watch: Stopwatch::idle(),
            children: Vec::new(),
        }
    }
}

/// A timer measuring elapsed wall-clock time per `tic`/`toc` pair, with
/// running statistics over all measured intervals and an owned tree of
/// child timers for hierarchical reporting.
///
/// Timing code is two calls:
///
/// ```
/// use tacho_core::Timer;
///
/// let mut timer = Timer::new("update");
/// timer.tic();
/// // ... the code to time ...
/// let seconds = timer.toc();
/// assert!(seconds >= 0.0);
/// assert_eq!(timer.count(), 1);
/// ```
///
/// `toc` re-arms the clock, so a `toc` immediately followed by a `tic` is
/// unnecessary when timing back-to-back iterations.
///
/// Children created with [`Timer::nest`] are owned by the tree and
/// addressed through copyable [`TimerId`] handles; a caller drives a child
/// exactly like the root via the `*_at` methods. Child measurements are
/// independent of the parent's — the tree exists for hierarchical
/// reporting, not automatic self-time decomposition.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Flat arena of nodes; index 0 is the root.
    nodes: Vec<TimerNode>,
}

impl Timer {
    /// Creates a timer with the given name. The report label is
    /// `"Timer <name>"`, or just `"Timer"` for an empty name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            nodes: vec![TimerNode::new(Self::label(name.as_ref()))],
        }
    }

    fn label(name: &str) -> String {
        if name.is_empty() {
            "Timer".to_string()
        } else {
            format!("Timer {name}")
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> TimerId {
        TimerId(0)
    }

    /// Appends a child timer under the root, in insertion order, and
    /// returns its handle.
    pub fn nest(&mut self, name: impl AsRef<str>) -> TimerId {
        self.nest_under(self.root(), name)
    }

    /// Appends a child timer under an arbitrary node, in insertion order,
    /// and returns its handle.
    pub fn nest_under(&mut self, parent: TimerId, name: impl AsRef<str>) -> TimerId {
        let child = TimerId(self.nodes.len());
        self.nodes.push(TimerNode::new(Self::label(name.as_ref())));
        self.nodes[parent.0].children.push(child.0);
        child
    }

    /// Starts (or restarts) the root's pending interval.
    pub fn tic(&mut self) {
        self.tic_at(self.root());
    }

    /// Starts (or restarts) a node's pending interval. Repeated calls
    /// overwrite the pending start without recording a sample.
    pub fn tic_at(&mut self, id: TimerId) {
        self.nodes[id.0].watch.restart();
    }

    /// Stops the root's pending interval; see [`Timer::toc_at`].
    pub fn toc(&mut self) -> f64 {
        self.toc_at(self.root())
    }

    /// Stops a node's pending interval, feeds the elapsed seconds into its
    /// statistic, and re-arms the clock to "now".
    ///
    /// Returns the just-added value, or NaN if the sample was rejected —
    /// either because there was no matching `tic` or because the elapsed
    /// value did not pass the statistic's finite-sample guard.
    pub fn toc_at(&mut self, id: TimerId) -> f64 {
        let node = &mut self.nodes[id.0];
        match node.watch.lap() {
            Some(elapsed) => node.stats.add(elapsed.as_secs_f64()),
            None => {
                log::warn!("toc on '{}' without a matching tic", node.stats.name());
                f64::NAN
            }
        }
    }

    /// Runs `f` between a `tic`/`toc` pair on the given node and returns
    /// its value.
    ///
    /// The sample is only recorded if `f` returns normally; use
    /// [`crate::timer::TimingGuard`] when the measurement must survive an
    /// unwind.
    pub fn time<R>(&mut self, id: TimerId, f: impl FnOnce() -> R) -> R {
        self.tic_at(id);
        let out = f();
        self.toc_at(id);
        out
    }

    /// The root's statistics.
    pub fn stats(&self) -> &Statistic {
        &self.nodes[0].stats
    }

    /// A node's statistics.
    pub fn stats_at(&self, id: TimerId) -> &Statistic {
        &self.nodes[id.0].stats
    }

    /// Child handles of a node, in insertion order.
    pub fn children(&self, id: TimerId) -> impl Iterator<Item = TimerId> + '_ {
        self.nodes[id.0].children.iter().map(|&idx| TimerId(idx))
    }

    /// Number of recorded root samples.
    pub fn count(&self) -> u64 {
        self.stats().count()
    }

    /// Mean recorded root interval in seconds.
    pub fn mean(&self) -> f64 {
        self.stats().mean()
    }

    /// Standard deviation of the recorded root intervals in seconds.
    pub fn std(&self) -> f64 {
        self.stats().std()
    }

    /// Shortest recorded root interval in seconds.
    pub fn min(&self) -> f64 {
        self.stats().min()
    }

    /// Longest recorded root interval in seconds.
    pub fn max(&self) -> f64 {
        self.stats().max()
    }

    /// Most recently recorded root interval in seconds.
    pub fn last(&self) -> f64 {
        self.stats().last()
    }

    /// Aggregate recorded root time in seconds.
    pub fn sum(&self) -> f64 {
        self.stats().sum()
    }

    /// Resets every node in the tree: statistics return to their initial
    /// state and pending starts are cleared. Children are retained, so
    /// existing [`TimerId`] handles stay valid.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.stats.reset();
            node.watch.clear();
        }
    }

    /// Captures the whole tree as a serializable snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_node(self.root())
    }

    /// Captures the subtree rooted at `id` as a serializable snapshot.
    pub fn snapshot_node(&self, id: TimerId) -> TimerSnapshot {
        TimerSnapshot {
            stats: self.nodes[id.0].stats.snapshot(),
            children: self
                .children(id)
                .map(|child| self.snapshot_node(child))
                .collect(),
        }
    }

    /// Direct mutable access to a node's statistic, for seeding
    /// deterministic aggregates in layout tests.
    #[cfg(test)]
    pub(crate) fn stats_mut(&mut self, id: TimerId) -> &mut Statistic {
        &mut self.nodes[id.0].stats
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new("")
    }
}

/// A point-in-time copy of a [`Timer`] tree, for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// The node's aggregate statistics.
    pub stats: StatisticSnapshot,
    /// Child snapshots, in insertion order.
    pub children: Vec<TimerSnapshot>,
}
