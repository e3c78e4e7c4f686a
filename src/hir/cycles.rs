//! Reference Resolver — dependency cycle detection.
//!
//! Runs after binding and follows only `DependsOn` edges. The traversal keeps
//! the current path as an ordered list, so when a node already on the path
//! is reached again the cycle is exactly the path suffix starting at that
//! node. Every cycle is collected; structurally identical cycles found from
//! different starting points are reported once.
//!
//! A cycle never leaves a strongly connected component, so the path search
//! only follows edges that stay inside the component of the node it is
//! leaving. Acyclic parts of the graph are then crossed once per node
//! instead of once per path.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use super::diagnostics::DiagnosticCollector;
use super::ids::DeclId;
use super::tree::ModuleTree;

/// Separator between members of a reported cycle.
const CYCLE_ARROW: &str = " -> ";

/// Collect every `DependsOn` cycle, in traversal order, before deduplication.
pub fn find_cycles(tree: &ModuleTree) -> Vec<Vec<DeclId>> {
    let mut finder = CycleFinder {
        tree,
        components: strongly_connected_components(tree),
        path: Vec::new(),
        reached: FxHashSet::default(),
        exhausted: FxHashSet::default(),
        cycles: Vec::new(),
    };
    for id in tree.walk() {
        if finder.exhausted.contains(&id) {
            continue;
        }
        finder.visit(id);
        // every cycle through a node reached from this start has been seen
        finder.exhausted.extend(finder.reached.drain());
    }
    finder.cycles
}

/// Membership signature of a cycle: member names sorted and comma-joined.
pub fn fingerprint(tree: &ModuleTree, cycle: &[DeclId]) -> String {
    let mut names: Vec<&str> = cycle.iter().map(|id| &*tree[*id].full_name).collect();
    names.sort_unstable();
    names.join(",")
}

/// Keep the first-seen cycle of each fingerprint, preserving its traversal order.
pub fn dedup_cycles(tree: &ModuleTree, cycles: Vec<Vec<DeclId>>) -> Vec<Vec<DeclId>> {
    let mut unique: IndexMap<String, Vec<DeclId>> = IndexMap::new();
    for cycle in cycles {
        unique.entry(fingerprint(tree, &cycle)).or_insert(cycle);
    }
    unique.into_values().collect()
}

/// `A -> B -> C -> A`
pub fn describe_cycle(tree: &ModuleTree, cycle: &[DeclId]) -> String {
    cycle
        .iter()
        .chain(cycle.first())
        .map(|id| &*tree[*id].full_name)
        .collect::<Vec<_>>()
        .join(CYCLE_ARROW)
}

/// Find, deduplicate, and report dependency cycles. Returns the number reported.
pub fn report_cycles(tree: &ModuleTree, diagnostics: &mut DiagnosticCollector) -> usize {
    let found = find_cycles(tree);
    let total = found.len();
    let cycles = dedup_cycles(tree, found);
    for cycle in &cycles {
        let location = cycle.first().and_then(|id| tree[*id].location.as_ref());
        diagnostics.circular_dependency(location, &describe_cycle(tree, cycle));
    }
    tracing::debug!(found = total, reported = cycles.len(), "checked dependency cycles");
    cycles.len()
}

struct CycleFinder<'a> {
    tree: &'a ModuleTree,
    /// Component number of each declaration, by arena index.
    components: Vec<Option<usize>>,
    path: Vec<DeclId>,
    /// Nodes reached from the current starting point.
    reached: FxHashSet<DeclId>,
    /// Nodes fully explored from an earlier starting point.
    exhausted: FxHashSet<DeclId>,
    cycles: Vec<Vec<DeclId>>,
}

impl CycleFinder<'_> {
    fn visit(&mut self, id: DeclId) {
        if let Some(start) = self.path.iter().position(|on_path| *on_path == id) {
            self.cycles.push(self.path[start..].to_vec());
            return;
        }
        if self.exhausted.contains(&id) {
            return;
        }
        self.reached.insert(id);
        self.path.push(id);
        let tree = self.tree;
        let component = self.component_of(id);
        let mut targets: Vec<DeclId> = tree[id]
            .depends_on_targets()
            .filter(|target| self.component_of(*target) == component)
            .collect();
        targets.dedup();
        for target in targets {
            self.visit(target);
        }
        self.path.pop();
    }

    fn component_of(&self, id: DeclId) -> Option<usize> {
        self.components.get(id.index()).copied().flatten()
    }
}

/// Tarjan's algorithm over `DependsOn` edges, with an explicit stack.
///
/// Returns the component number of every declaration reachable from the
/// root, indexed by arena position. Numbers are only compared for equality.
fn strongly_connected_components(tree: &ModuleTree) -> Vec<Option<usize>> {
    let count = tree.declaration_count();
    let mut tarjan = Tarjan {
        index: vec![None; count],
        low_link: vec![0; count],
        on_stack: vec![false; count],
        stack: Vec::new(),
        component: vec![None; count],
        next_index: 0,
        next_component: 0,
    };
    for root in tree.walk() {
        if tarjan.index[root.index()].is_none() {
            tarjan.connect(tree, root);
        }
    }
    tarjan.component
}

struct Frame {
    node: DeclId,
    targets: Vec<DeclId>,
    next: usize,
}

struct Tarjan {
    index: Vec<Option<usize>>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<DeclId>,
    component: Vec<Option<usize>>,
    next_index: usize,
    next_component: usize,
}

impl Tarjan {
    fn open(&mut self, tree: &ModuleTree, node: DeclId) -> Frame {
        let i = node.index();
        self.index[i] = Some(self.next_index);
        self.low_link[i] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[i] = true;
        Frame {
            node,
            targets: tree[node]
                .depends_on_targets()
                .filter(|target| target.index() < self.index.len())
                .collect(),
            next: 0,
        }
    }

    fn connect(&mut self, tree: &ModuleTree, root: DeclId) {
        let mut frames = vec![self.open(tree, root)];
        while let Some(frame) = frames.last_mut() {
            let node = frame.node.index();
            if let Some(target) = frame.targets.get(frame.next).copied() {
                frame.next += 1;
                match self.index[target.index()] {
                    None => {
                        let child = self.open(tree, target);
                        frames.push(child);
                    }
                    Some(target_index) if self.on_stack[target.index()] => {
                        self.low_link[node] = self.low_link[node].min(target_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(parent) = frames.last() {
                let parent = parent.node.index();
                self.low_link[parent] = self.low_link[parent].min(self.low_link[node]);
            }
            if Some(self.low_link[node]) == self.index[node] {
                while let Some(member) = self.stack.pop() {
                    self.on_stack[member.index()] = false;
                    self.component[member.index()] = Some(self.next_component);
                    if member.index() == node {
                        break;
                    }
                }
                self.next_component += 1;
            }
        }
    }
}
