#[macro_use]
mod macros;

mod error;
pub use error::{Error, IntoError};

pub mod mapping;
pub use mapping::MappingNode;

pub mod metadata;
pub use metadata::EntityMetadata;

pub mod row;
pub use row::{Row, RowCursor};

pub mod value;
pub use value::{Type, Value};

/// A Result type alias that uses hydrate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
