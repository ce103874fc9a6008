use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use smallvec::SmallVec;

use crate::foundation::error::{ScrollstageError, ScrollstageResult};

/// Default delay between a node activating and its neighbours following.
pub const DEFAULT_EDGE_DELAY_SECS: f64 = 0.3;

/// Serialized node graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphDef {
    /// Propagation delay per edge, in seconds.
    #[serde(default = "default_edge_delay")]
    pub edge_delay_secs: f64,
    /// Nodes with their outgoing connections.
    pub nodes: Vec<NodeDef>,
}

fn default_edge_delay() -> f64 {
    DEFAULT_EDGE_DELAY_SECS
}

/// One node of a [`GraphDef`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeDef {
    /// Unique label.
    pub id: String,
    /// Labels of nodes activated after this one.
    #[serde(default)]
    pub connections: Vec<String>,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    at: f64,
    node: usize,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .total_cmp(&other.at)
            .then(self.node.cmp(&other.node))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// Time-driven activation wave over a directed node graph.
///
/// Activating a node schedules each neighbour `edge_delay_secs` later. Time is passed in
/// explicitly; nothing here owns a timer. Determinism rule: activations due at the same
/// instant are released in node order. A node activates at most once per wave, so cycles
/// terminate.
#[derive(Clone, Debug)]
pub struct GraphActivationScheduler {
    labels: Vec<String>,
    edges: Vec<SmallVec<[usize; 4]>>,
    edge_delay_secs: f64,
    active: Vec<bool>,
    pending: BinaryHeap<Reverse<Pending>>,
}

impl GraphActivationScheduler {
    /// Empty graph with the given per-edge delay.
    pub fn new(edge_delay_secs: f64) -> ScrollstageResult<Self> {
        if !edge_delay_secs.is_finite() || edge_delay_secs < 0.0 {
            return Err(ScrollstageError::configuration(
                "edge delay must be finite and non-negative",
            ));
        }
        Ok(Self {
            labels: Vec::new(),
            edges: Vec::new(),
            edge_delay_secs,
            active: Vec::new(),
            pending: BinaryHeap::new(),
        })
    }

    /// Build from a serialized graph, resolving connections by label.
    pub fn from_def(def: &GraphDef) -> ScrollstageResult<Self> {
        let mut out = Self::new(def.edge_delay_secs)?;
        let mut ids = HashMap::with_capacity(def.nodes.len());
        for node in &def.nodes {
            let idx = out.add_node(node.id.clone());
            if ids.insert(node.id.as_str(), idx).is_some() {
                return Err(ScrollstageError::configuration(format!(
                    "duplicate graph node '{}'",
                    node.id
                )));
            }
        }
        for (from, node) in def.nodes.iter().enumerate() {
            for to in &node.connections {
                let Some(&to) = ids.get(to.as_str()) else {
                    return Err(ScrollstageError::configuration(format!(
                        "graph node '{}' connects to unknown node '{to}'",
                        node.id
                    )));
                };
                out.connect(from, to)?;
            }
        }
        Ok(out)
    }

    /// Parse a JSON graph definition.
    pub fn from_json_str(s: &str) -> ScrollstageResult<Self> {
        let def: GraphDef = serde_json::from_str(s)?;
        Self::from_def(&def)
    }

    /// Append a node and return its index.
    pub fn add_node(&mut self, label: impl Into<String>) -> usize {
        self.labels.push(label.into());
        self.edges.push(SmallVec::new());
        self.active.push(false);
        self.labels.len() - 1
    }

    /// Add a directed edge. Repeated edges are ignored.
    pub fn connect(&mut self, from: usize, to: usize) -> ScrollstageResult<()> {
        let n = self.labels.len();
        if from >= n || to >= n {
            return Err(ScrollstageError::configuration(format!(
                "edge {from} -> {to} is out of range for {n} nodes"
            )));
        }
        if !self.edges[from].contains(&to) {
            self.edges[from].push(to);
        }
        Ok(())
    }

    /// Index of the node labelled `label`.
    pub fn node(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Label of node `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Return `true` for a graph without nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Activate `node` at `now` and schedule its neighbours.
    ///
    /// Returns `false` when the node was already active or does not exist.
    pub fn activate(&mut self, node: usize, now: f64) -> bool {
        if self.active.get(node).copied() != Some(false) {
            return false;
        }
        self.active[node] = true;
        let at = now + self.edge_delay_secs;
        for &next in &self.edges[node] {
            if !self.active[next] {
                self.pending.push(Reverse(Pending { at, node: next }));
            }
        }
        true
    }

    /// Start a new wave: clear everything, then seed `nodes` `stagger_secs` apart from `now`.
    pub fn activate_pattern(&mut self, nodes: &[usize], now: f64, stagger_secs: f64) {
        self.reset();
        let stagger = if stagger_secs.is_finite() {
            stagger_secs.max(0.0)
        } else {
            0.0
        };
        for (i, &node) in nodes.iter().enumerate() {
            if node < self.labels.len() {
                self.pending.push(Reverse(Pending {
                    at: now + i as f64 * stagger,
                    node,
                }));
            }
        }
    }

    /// Release every activation due at or before `now`.
    ///
    /// Returns the newly activated nodes in release order. Neighbours are scheduled relative
    /// to the instant their parent was due, not to `now`, so coarse polling does not stretch
    /// the wave.
    pub fn advance(&mut self, now: f64) -> Vec<usize> {
        let mut out = Vec::new();
        while let Some(Reverse(next)) = self.pending.peek().copied() {
            if next.at > now {
                break;
            }
            self.pending.pop();
            if self.activate(next.node, next.at) {
                out.push(next.node);
            }
        }
        out
    }

    /// Return `true` while `node` is active.
    pub fn is_active(&self, node: usize) -> bool {
        self.active.get(node).copied().unwrap_or(false)
    }

    /// Active nodes in index order.
    pub fn active_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.then_some(i))
    }

    /// Time of the next scheduled activation.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.peek().map(|Reverse(p)| p.at)
    }

    /// Return `true` when no activation is pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deactivate every node and drop pending activations.
    pub fn reset(&mut self) {
        self.active.iter_mut().for_each(|a| *a = false);
        self.pending.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/activation.rs"]
mod tests;
