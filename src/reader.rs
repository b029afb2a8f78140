use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NestedSetConfig;
use crate::error::NestedSetError;

/// Interval coordinates of one node, as stored in the backing table.
///
/// `scope` is the value of the forest scope column ("root id"); interval
/// comparisons are only meaningful between nodes sharing the same scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCoordinates {
    pub id: i64,
    pub left: i64,
    pub right: i64,
    pub level: i64,
    pub scope: i64,
}

impl NodeCoordinates {
    /// A leaf spans the smallest possible interval.
    pub fn is_leaf(&self) -> bool {
        self.right == self.left + 1
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Strict containment test; false across forests and for the node itself.
    pub fn is_descendant_of(&self, other: &NodeCoordinates) -> bool {
        self.scope == other.scope && self.left > other.left && self.right < other.right
    }

    pub fn is_ancestor_of(&self, other: &NodeCoordinates) -> bool {
        other.is_descendant_of(self)
    }
}

/// Source of node coordinates, the lookup every node-scoped query starts from.
///
/// Kept behind a trait so the factory can be driven by an in-memory
/// implementation in tests, and so a missing node surfaces as
/// [`NestedSetError::NodeNotFound`] instead of a backend-specific failure.
#[async_trait]
pub trait NodeReader: Send + Sync {
    async fn read_coordinates(
        &self,
        config: &NestedSetConfig,
        table: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<NodeCoordinates, NestedSetError>;
}

/// [`NodeReader`] fetching coordinates through a SeaORM connection.
pub struct SqlNodeReader<'c, C> {
    conn: &'c C,
}

impl<'c, C> SqlNodeReader<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> NodeReader for SqlNodeReader<'_, C>
where
    C: ConnectionTrait,
{
    async fn read_coordinates(
        &self,
        config: &NestedSetConfig,
        table: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<NodeCoordinates, NestedSetError> {
        let mut select = Query::select();
        select
            .columns([
                Alias::new(config.id_column()),
                Alias::new(config.left_column()),
                Alias::new(config.right_column()),
                Alias::new(config.level_column()),
                Alias::new(scope_column),
            ])
            .from(Alias::new(table))
            .and_where(Expr::col(Alias::new(config.id_column())).eq(node_id));

        let backend = self.conn.get_database_backend();
        let row = self
            .conn
            .query_one(backend.build(&select))
            .await?
            .ok_or(NestedSetError::NodeNotFound { id: node_id })?;

        let coordinates = NodeCoordinates {
            id: row.try_get("", config.id_column())?,
            left: row.try_get("", config.left_column())?,
            right: row.try_get("", config.right_column())?,
            level: row.try_get("", config.level_column())?,
            scope: row.try_get("", scope_column)?,
        };

        debug!(node_id, table, "read nested set coordinates");

        Ok(coordinates)
    }
}
