//! Cycle sweep.
//!
//! Counted references free a frame as soon as nothing holds it, except when
//! the holders form a cycle: an object whose method was defined inside it,
//! or two objects pointing at each other. The sweep finds those frames by
//! trial deletion. Every reference the stack's own frames hold is counted;
//! a frame or shared allocation with more holders than that is referenced
//! from outside (a running call, a host value, a native's locals) and is a
//! root. Frames not reachable from a root or from the root frame are freed.

use std::collections::hash_map::Entry;

use rook_ir::FrameId;
use rook_value::{FunctionBody, Segment, Series, Value};
use rustc_hash::{FxHashMap, FxHashSet};

use super::Stack;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Node {
    Frame(FrameId),
    /// A series storage, function definition or path segment list.
    Shared(*const ()),
}

#[derive(Default)]
struct Graph {
    /// References to each node found inside the stack.
    inner: FxHashMap<Node, usize>,
    /// Total holders of each shared allocation seen.
    holders: FxHashMap<Node, usize>,
    edges: FxHashMap<Node, Vec<Node>>,
}

impl Graph {
    fn link(&mut self, from: Node, to: Node) {
        *self.inner.entry(to).or_default() += 1;
        self.edges.entry(from).or_default().push(to);
    }

    /// Whether `node` is new; its holder count is recorded on first sight.
    fn first_visit(&mut self, node: Node, holders: usize) -> bool {
        match self.holders.entry(node) {
            Entry::Vacant(entry) => {
                entry.insert(holders);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Holders not accounted for by references inside the stack.
    fn outside(&self, node: Node, holders: usize) -> bool {
        holders > self.inner.get(&node).copied().unwrap_or(0)
    }

    fn scan_value(&mut self, from: Node, value: &Value) {
        match value {
            Value::Object(object) => self.link(from, Node::Frame(object.frame())),
            Value::Function(function) => {
                let node = Node::Shared(function.as_ptr());
                self.link(from, node);
                if self.first_visit(node, function.holders()) {
                    if let FunctionBody::User(user) = function.body() {
                        self.link(node, Node::Frame(user.definition.id()));
                        self.scan_series(node, &user.body);
                    }
                }
            }
            Value::Block(series) | Value::Paren(series) => self.scan_series(from, series),
            Value::Path(path) | Value::GetPath(path) | Value::SetPath(path) => {
                let node = Node::Shared(path.as_ptr());
                self.link(from, node);
                if self.first_visit(node, path.holders()) {
                    for segment in path.segments() {
                        if let Segment::Eval(block) = segment {
                            self.scan_series(node, block);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn scan_series(&mut self, from: Node, series: &Series<Value>) {
        let node = Node::Shared(series.storage_ptr());
        self.link(from, node);
        if self.first_visit(node, series.holders()) {
            series.with_storage(|items| {
                for item in items {
                    self.scan_value(node, item);
                }
            });
        }
    }
}

impl Stack {
    /// Free frames that only reference cycles keep alive. Returns how many
    /// were freed.
    pub fn sweep(&mut self) -> usize {
        let mut graph = Graph::default();
        for (id, frame) in self.frames() {
            let node = Node::Frame(id);
            if let Some(parent) = frame.parent_ref() {
                graph.link(node, Node::Frame(parent.id()));
            }
            for (_, value) in frame.bindings() {
                graph.scan_value(node, value);
            }
        }

        let mut pending = vec![Node::Frame(FrameId::ROOT)];
        for (id, _) in self.frames() {
            let node = Node::Frame(id);
            if graph.outside(node, self.slots[id.index()].holder.holders()) {
                pending.push(node);
            }
        }
        for (&node, &holders) in &graph.holders {
            if graph.outside(node, holders) {
                pending.push(node);
            }
        }

        let mut reached = FxHashSet::default();
        while let Some(node) = pending.pop() {
            if reached.insert(node) {
                if let Some(next) = graph.edges.get(&node) {
                    pending.extend(next.iter().copied());
                }
            }
        }

        let unreachable: Vec<FrameId> = self
            .frames()
            .map(|(id, _)| id)
            .filter(|id| !reached.contains(&Node::Frame(*id)))
            .collect();
        let dropped: Vec<_> = unreachable
            .into_iter()
            .filter_map(|id| self.free_slot(id))
            .collect();
        let freed = dropped.len();
        // Their ids were retired above, so the releases these drops queue
        // are ignored.
        drop(dropped);
        self.reclaim();

        self.next_sweep = (self.live * 2).max(super::FIRST_SWEEP);
        tracing::debug!(freed, live = self.live, "swept unreachable frames");
        freed
    }
}
