use crate::engine::Engine;
use crate::{Graph, Load, Materializer, Result};
use hydrate_core::{MappingNode, RowCursor};

use std::marker::PhantomData;

/// A pending materialization pass.
///
/// The cursor is only read once one of the consuming methods is called. A
/// pass either completes and yields every result, or fails as a whole.
pub struct Materialized<'m, C> {
    materializer: &'m Materializer,
    mapping: &'m MappingNode,
    rows: C,
}

/// Iterator over the results of a pass, loaded as `T`.
///
/// The whole cursor is folded on the first call to `next`. If the pass fails,
/// the iterator yields that error once and then ends.
pub struct Results<'m, C, T> {
    state: State<'m, C>,
    _p: PhantomData<T>,
}

enum State<'m, C> {
    Pending(Materialized<'m, C>),
    Ready { graph: Graph, next: usize },
    Done,
}

impl<'m, C: RowCursor> Materialized<'m, C> {
    pub(crate) fn new(materializer: &'m Materializer, mapping: &'m MappingNode, rows: C) -> Self {
        Self {
            materializer,
            mapping,
            rows,
        }
    }

    /// Runs the pass and returns the full graph.
    pub fn into_graph(self) -> Result<Graph> {
        let Self {
            materializer,
            mapping,
            rows,
        } = self;

        let engine = Engine::new(mapping, &*materializer.metadata, &materializer.options)?;
        engine.run(mapping, rows)
    }

    /// Runs the pass and loads every result.
    pub fn list<T: Load>(self) -> Result<Vec<T>> {
        self.into_graph()?.load()
    }

    /// Runs the pass and loads its only result.
    ///
    /// Fails with a no-result error when the pass produced nothing, and with
    /// a non-unique-result error when it produced more than one result.
    pub fn single<T: Load>(self) -> Result<T> {
        let graph = self.into_graph()?;
        let output = graph.single()?;
        T::load(output)
    }

    pub fn iter<T: Load>(self) -> Results<'m, C, T> {
        Results {
            state: State::Pending(self),
            _p: PhantomData,
        }
    }
}

impl<C: RowCursor, T: Load> Iterator for Results<'_, C, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        loop {
            match std::mem::replace(&mut self.state, State::Done) {
                State::Pending(materialized) => match materialized.into_graph() {
                    Ok(graph) => self.state = State::Ready { graph, next: 0 },
                    Err(err) => return Some(Err(err)),
                },
                State::Ready { graph, next } => {
                    let item = graph.result(next).map(T::load)?;
                    self.state = State::Ready {
                        graph,
                        next: next + 1,
                    };
                    return Some(item);
                }
                State::Done => return None,
            }
        }
    }
}
