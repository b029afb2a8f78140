//! Read queries for nested-set trees stored in SQL.
//!
//! A nested-set table encodes each tree as `left`/`right` intervals plus a
//! `level` per node, so ancestry and containment reduce to interval
//! comparisons a database answers in one pass, without recursive joins. This
//! crate builds those queries on top of `sea_query`: every traversal
//! operation resolves the target node's coordinates through a SeaORM
//! connection (or any [`reader::NodeReader`]) and returns a `SelectStatement`
//! the caller projects and executes. A forest scope column keeps tables with
//! multiple independent trees isolated. Writing and rebalancing the tree are
//! out of scope.

pub mod config;
pub mod error;
pub mod factory;
pub mod inspector;
pub mod reader;

pub mod prelude {
    //! Convenient re-exports for consumers.
    pub use crate::config::NestedSetConfig;
    pub use crate::error::NestedSetError;
    pub use crate::factory::NestedSetQueryFactory;
    pub use crate::inspector::NodeInspector;
    pub use crate::reader::{NodeCoordinates, NodeReader, SqlNodeReader};
}

pub use config::NestedSetConfig;
pub use error::NestedSetError;
pub use factory::NestedSetQueryFactory;
pub use inspector::NodeInspector;
pub use reader::{NodeCoordinates, NodeReader, SqlNodeReader};
