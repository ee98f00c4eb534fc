//! Folds a row cursor into a [`Graph`] in a single forward pass.
//!
//! Each row is visited top-down along the mapping tree. Entity nodes resolve
//! their identity key first, so that rows repeating a parent only contribute
//! new children to the instance created by the first such row.

mod plan;
use plan::Plans;

mod registry;
use registry::IdentityRegistry;

mod visit;

use crate::graph::{Graph, InstanceId, Output};
use crate::materializer::Options;
use hydrate_core::{err, EntityMetadata, MappingNode, Result, RowCursor};

use std::collections::HashSet;

pub(crate) struct Engine<'a> {
    options: &'a Options,
    plans: Plans<'a>,
    registry: IdentityRegistry,

    /// Top-level outputs in first-appearance order.
    results: Vec<Output>,

    /// Instances already emitted as top-level results.
    emitted: HashSet<InstanceId>,
}

impl<'a> Engine<'a> {
    /// Prepares a pass over `root`. Fails on mappings whose entity types
    /// cannot be resolved, before any row is read.
    pub(crate) fn new(
        root: &'a MappingNode,
        metadata: &dyn EntityMetadata,
        options: &'a Options,
    ) -> Result<Self> {
        Ok(Engine {
            options,
            plans: Plans::prepare(root, metadata, options.diagnostics)?,
            registry: IdentityRegistry::default(),
            results: vec![],
            emitted: HashSet::new(),
        })
    }

    pub(crate) fn run(mut self, root: &'a MappingNode, mut rows: impl RowCursor) -> Result<Graph> {
        let span = tracing::trace_span!("materialize", root = node_kind(root));
        let _enter = span.enter();

        let mut num_rows = 0;

        while rows.has_next() {
            let row = rows.next()?;
            num_rows += 1;

            let output = self
                .visit_node(root, &row)
                .map_err(|e| e.context(err!("row {num_rows}")))?;

            self.emit(output);
        }

        tracing::debug!(
            rows = num_rows,
            results = self.results.len(),
            instances = self.registry.len(),
            "materialization pass complete"
        );

        Ok(Graph::new(self.registry.into_instances(), self.results))
    }

    /// Records a top-level output. An entity is emitted only the first time
    /// its identity is reached, wherever that happened in the tree.
    fn emit(&mut self, output: Output) {
        if let Output::Entity(id) = output {
            if !self.emitted.insert(id) {
                return;
            }
        }

        self.results.push(output);
    }
}

fn node_kind(node: &MappingNode) -> &'static str {
    match node {
        MappingNode::Column(_) => "column",
        MappingNode::Constructor(_) => "constructor",
        MappingNode::Entity(_) => "entity",
        MappingNode::Embedded(_) => "embedded",
        MappingNode::Compound(_) => "compound",
        MappingNode::Tuple(_) => "tuple",
    }
}
