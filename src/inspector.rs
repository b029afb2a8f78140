use sea_orm::ConnectionTrait;

use crate::config::NestedSetConfig;
use crate::error::NestedSetError;
use crate::reader::{NodeCoordinates, NodeReader, SqlNodeReader};

/// Answers yes/no questions about nodes and their relationships.
///
/// Each check resolves the coordinates of the nodes involved and compares
/// intervals locally; the per-node lookup is the only database work. Nodes
/// from different forests are never related.
pub struct NodeInspector<R> {
    config: NestedSetConfig,
    reader: R,
}

impl<R> NodeInspector<R> {
    pub fn new(config: NestedSetConfig, reader: R) -> Self {
        Self { config, reader }
    }
}

impl<'c, C> NodeInspector<SqlNodeReader<'c, C>>
where
    C: ConnectionTrait,
{
    /// Inspector resolving node coordinates through the given connection.
    pub fn with_connection(conn: &'c C, config: NestedSetConfig) -> Self {
        Self::new(config, SqlNodeReader::new(conn))
    }
}

impl<R> NodeInspector<R>
where
    R: NodeReader,
{
    pub async fn is_leaf(
        &self,
        table: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<bool, NestedSetError> {
        Ok(self.resolve(table, scope_column, node_id).await?.is_leaf())
    }

    pub async fn is_root(
        &self,
        table: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<bool, NestedSetError> {
        Ok(self.resolve(table, scope_column, node_id).await?.is_root())
    }

    /// Whether `child_id` sits strictly below `parent_id`.
    pub async fn is_descendant(
        &self,
        table: &str,
        scope_column: &str,
        child_id: i64,
        parent_id: i64,
    ) -> Result<bool, NestedSetError> {
        let child = self.resolve(table, scope_column, child_id).await?;
        let parent = self.resolve(table, scope_column, parent_id).await?;
        Ok(child.is_descendant_of(&parent))
    }

    pub async fn is_descendant_or_equal(
        &self,
        table: &str,
        scope_column: &str,
        child_id: i64,
        parent_id: i64,
    ) -> Result<bool, NestedSetError> {
        let child = self.resolve(table, scope_column, child_id).await?;
        let parent = self.resolve(table, scope_column, parent_id).await?;
        Ok(child.id == parent.id || child.is_descendant_of(&parent))
    }

    pub async fn is_ancestor(
        &self,
        table: &str,
        scope_column: &str,
        ancestor_id: i64,
        descendant_id: i64,
    ) -> Result<bool, NestedSetError> {
        let ancestor = self.resolve(table, scope_column, ancestor_id).await?;
        let descendant = self.resolve(table, scope_column, descendant_id).await?;
        Ok(ancestor.is_ancestor_of(&descendant))
    }

    async fn resolve(
        &self,
        table: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<NodeCoordinates, NestedSetError> {
        self.reader
            .read_coordinates(&self.config, table, scope_column, node_id)
            .await
    }
}
