mod engine;

pub mod graph;
pub use graph::{
    CompoundRef, ConstructedRef, EmbeddedRef, EntityRef, Graph, InstanceId, OutputRef, TupleRef,
};

mod load;
pub use load::Load;

pub mod materializer;
pub use materializer::{ColumnCase, Materializer};

mod results;
pub use results::{Materialized, Results};

pub use hydrate_core::{
    bail, err, mapping, metadata, row, value, EntityMetadata, Error, MappingNode, Result, Row,
    RowCursor, Type, Value,
};
