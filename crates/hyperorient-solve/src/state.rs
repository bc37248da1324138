use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use hyperorient_core::errors::OrientError;
use hyperorient_graph::{Edge, Hypergraph, Vertex};

use crate::config::SolveConfig;
use crate::report::Termination;

/// How much load an edge puts on its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Weighting {
    /// Each edge counts once.
    Unweighted,
    /// Each edge counts its weight.
    Weighted,
}

#[derive(Debug, Clone)]
struct Slot<V> {
    edge: Edge<V>,
    weight: f64,
    head: V,
}

/// Current orientation (edge slot → head) plus the per-vertex loads derived
/// from it.
///
/// Slots hold headless edges; the head lives beside the edge so retargeting
/// is a field update plus two load adjustments. `headed` mirrors the heads
/// so "edges headed at v" is a map lookup.
#[derive(Debug, Clone)]
pub(crate) struct OrientationState<V> {
    weighting: Weighting,
    slots: Vec<Slot<V>>,
    loads: BTreeMap<V, f64>,
    headed: BTreeMap<V, BTreeSet<usize>>,
}

impl<V: Vertex> OrientationState<V> {
    pub(crate) fn new(vertices: &BTreeSet<V>, weighting: Weighting) -> Self {
        Self {
            weighting,
            slots: Vec::new(),
            loads: vertices.iter().map(|v| (v.clone(), 0.0)).collect(),
            headed: BTreeMap::new(),
        }
    }

    /// Adds an edge headed at `head`. `head` must be a member of `edge`.
    pub(crate) fn push(&mut self, edge: Edge<V>, weight: f64, head: V) {
        let slot = self.slots.len();
        let amount = self.amount(weight);
        *self.loads.entry(head.clone()).or_default() += amount;
        self.headed.entry(head.clone()).or_default().insert(slot);
        self.slots.push(Slot {
            edge: edge.undirected(),
            weight,
            head,
        });
    }

    /// Moves the head of `slot` to `head`.
    pub(crate) fn retarget(&mut self, slot: usize, head: V) {
        let record = &mut self.slots[slot];
        if record.head == head {
            return;
        }
        let previous = std::mem::replace(&mut record.head, head.clone());
        let weight = record.weight;
        let amount = self.amount(weight);
        *self.loads.entry(previous.clone()).or_default() -= amount;
        *self.loads.entry(head.clone()).or_default() += amount;
        if let Some(slots) = self.headed.get_mut(&previous) {
            slots.remove(&slot);
        }
        self.headed.entry(head).or_default().insert(slot);
    }

    pub(crate) fn load(&self, vertex: &V) -> f64 {
        self.loads.get(vertex).copied().unwrap_or(0.0)
    }

    pub(crate) fn edge(&self, slot: usize) -> &Edge<V> {
        &self.slots[slot].edge
    }

    pub(crate) fn head(&self, slot: usize) -> &V {
        &self.slots[slot].head
    }

    /// Load contributed by `slot` under the state's weighting.
    pub(crate) fn amount_of(&self, slot: usize) -> f64 {
        self.amount(self.slots[slot].weight)
    }

    /// Slots currently headed at `vertex`, ascending.
    pub(crate) fn headed_at<'a>(&'a self, vertex: &V) -> impl Iterator<Item = usize> + 'a {
        self.headed
            .get(vertex)
            .into_iter()
            .flat_map(|slots| slots.iter().copied())
    }

    /// Vertex with the largest load; ties go to the smallest vertex.
    pub(crate) fn max_vertex(&self) -> Option<(V, f64)> {
        let mut best: Option<(&V, f64)> = None;
        for (vertex, load) in &self.loads {
            if best.map_or(true, |(_, top)| *load > top) {
                best = Some((vertex, *load));
            }
        }
        best.map(|(vertex, load)| (vertex.clone(), load))
    }

    pub(crate) fn max_load(&self) -> f64 {
        self.max_vertex().map_or(0.0, |(_, load)| load)
    }

    /// Vertices ordered by ascending load, ties by vertex order.
    pub(crate) fn vertices_by_load(&self) -> Vec<V> {
        let mut order: Vec<(&V, f64)> = self.loads.iter().map(|(v, l)| (v, *l)).collect();
        order.sort_by(|(va, la), (vb, lb)| la.total_cmp(lb).then_with(|| va.cmp(vb)));
        order.into_iter().map(|(v, _)| v.clone()).collect()
    }

    /// Member of `edge` with the lowest current load; ties by vertex order.
    pub(crate) fn least_loaded_member(&self, edge: &Edge<V>) -> V {
        edge.iter()
            .min_by(|a, b| self.load(a).total_cmp(&self.load(b)).then_with(|| a.cmp(b)))
            .cloned()
            .expect("edges have at least one member")
    }

    /// Materializes the orientation as a directed hypergraph.
    ///
    /// Slots that end up as the same directed edge are merged and their
    /// weights summed.
    pub(crate) fn into_hypergraph(self) -> Result<Hypergraph<V>, OrientError> {
        let mut graph = Hypergraph::new(true);
        for vertex in self.loads.into_keys() {
            graph.add_vertex(vertex);
        }
        for slot in self.slots {
            let edge = slot.edge.reheaded(slot.head)?;
            let weight = match graph.weights().get(&edge) {
                Some(existing) => existing + slot.weight,
                None => slot.weight,
            };
            graph.add_edge(edge, weight)?;
        }
        Ok(graph)
    }

    fn amount(&self, weight: f64) -> f64 {
        match self.weighting {
            Weighting::Unweighted => 1.0,
            Weighting::Weighted => weight,
        }
    }
}

/// Step and wall-clock allowance for one solve.
#[derive(Debug)]
pub(crate) struct Budget {
    max_steps: usize,
    deadline: Option<Instant>,
    steps: usize,
}

impl Budget {
    pub(crate) fn start(config: &SolveConfig) -> Self {
        Self {
            max_steps: config.max_steps,
            deadline: config
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            steps: 0,
        }
    }

    /// Reason the next transition may not run, if any.
    pub(crate) fn exhausted(&self) -> Option<Termination> {
        if self.steps >= self.max_steps {
            return Some(Termination::StepBudget);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Termination::TimeBudget),
            _ => None,
        }
    }

    pub(crate) fn spend(&mut self) {
        self.steps += 1;
    }

    pub(crate) fn steps(&self) -> usize {
        self.steps
    }
}
