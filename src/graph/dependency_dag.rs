use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::task::Task;

/// Directed graph over finish-to-start links, edges pointing predecessor to
/// successor. Built from a task snapshot for whole-graph integrity checks;
/// the move-time conflict detector stays single-hop and does not use this.
pub struct DependencyDag {
    graph: DiGraph<i32, ()>,
    id_to_index: HashMap<i32, NodeIndex>,
}

impl DependencyDag {
    /// Builds the graph. Links to unknown task ids are skipped, matching the
    /// tolerant read path of the rest of the engine.
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph: DiGraph<i32, ()> = DiGraph::new();
        let mut id_to_index: HashMap<i32, NodeIndex> = HashMap::with_capacity(tasks.len());

        for task in tasks {
            let node_ix = graph.add_node(task.id);
            id_to_index.insert(task.id, node_ix);
        }
        for task in tasks {
            for pred_id in &task.predecessors {
                if let (Some(&u), Some(&v)) = (id_to_index.get(pred_id), id_to_index.get(&task.id))
                {
                    graph.add_edge(u, v, ());
                }
            }
        }

        Self { graph, id_to_index }
    }

    pub fn contains(&self, task_id: i32) -> bool {
        self.id_to_index.contains_key(&task_id)
    }

    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Task ids of the first dependency cycle found, sorted, or `None` for a
    /// proper DAG. Single-node self-links count as cycles.
    pub fn cycle_ids(&self) -> Option<Vec<i32>> {
        for scc in tarjan_scc(&self.graph) {
            if scc.len() > 1 {
                let mut ids: Vec<i32> = scc.iter().map(|ix| self.graph[*ix]).collect();
                ids.sort_unstable();
                return Some(ids);
            }
            if let [only] = scc.as_slice() {
                if self.graph.find_edge(*only, *only).is_some() {
                    return Some(vec![self.graph[*only]]);
                }
            }
        }
        None
    }
}
