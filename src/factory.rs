use sea_orm::sea_query::{Alias, Condition, Expr, Order, Query, SelectStatement};
use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::config::NestedSetConfig;
use crate::error::NestedSetError;
use crate::reader::{NodeCoordinates, NodeReader, SqlNodeReader};

/// Builds read queries against a nested-set table.
///
/// Every operation returns a [`SelectStatement`] with the table, alias,
/// predicates and ordering already bound. Callers add their projection and
/// render it for the backend of their choice; nothing here executes a tree
/// query. The only database round trip is the per-node coordinate lookup
/// done through the injected [`NodeReader`].
///
/// Node-scoped operations resolve the target's coordinates first and pin
/// every predicate to the resolved forest scope, so a table holding several
/// independent trees never leaks rows across them.
pub struct NestedSetQueryFactory<R> {
    config: NestedSetConfig,
    reader: R,
}

impl<R> NestedSetQueryFactory<R> {
    pub fn new(config: NestedSetConfig, reader: R) -> Self {
        Self { config, reader }
    }

    pub fn config(&self) -> &NestedSetConfig {
        &self.config
    }
}

impl<'c, C> NestedSetQueryFactory<SqlNodeReader<'c, C>>
where
    C: ConnectionTrait,
{
    /// Factory resolving node coordinates through the given connection.
    pub fn with_connection(conn: &'c C, config: NestedSetConfig) -> Self {
        Self::new(config, SqlNodeReader::new(conn))
    }
}

impl<R> NestedSetQueryFactory<R>
where
    R: NodeReader,
{
    /// Direct children of `node_id`, in sibling order.
    pub async fn children(
        &self,
        table: &str,
        alias: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<SelectStatement, NestedSetError> {
        let node = self.resolve(table, scope_column, node_id).await?;

        let mut select = from_table(table, alias);
        select
            .cond_where(self.children_of(alias, scope_column, &node))
            .order_by(column(alias, self.config.left_column()), Order::Asc);
        Ok(select)
    }

    /// The node itself plus its direct children.
    ///
    /// A node's `left` is the smallest of its own subtree, so ordering by
    /// `left` already yields the node first, then the children in sibling
    /// order.
    pub async fn parent_and_children(
        &self,
        table: &str,
        alias: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<SelectStatement, NestedSetError> {
        let node = self.resolve(table, scope_column, node_id).await?;

        let condition = Condition::any()
            .add(Expr::col(column(alias, self.config.id_column())).eq(node.id))
            .add(self.children_of(alias, scope_column, &node));

        let mut select = from_table(table, alias);
        select
            .cond_where(condition)
            .order_by(column(alias, self.config.left_column()), Order::Asc);
        Ok(select)
    }

    /// All strict descendants of `node_id`, any depth, in pre-order.
    pub async fn subtree(
        &self,
        table: &str,
        alias: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<SelectStatement, NestedSetError> {
        let node = self.resolve(table, scope_column, node_id).await?;

        let condition = Condition::all()
            .add(Expr::col(column(alias, scope_column)).eq(node.scope))
            .add(Expr::col(column(alias, self.config.left_column())).gt(node.left))
            .add(Expr::col(column(alias, self.config.right_column())).lt(node.right));

        let mut select = from_table(table, alias);
        select
            .cond_where(condition)
            .order_by(column(alias, self.config.left_column()), Order::Asc);
        Ok(select)
    }

    /// The chain from the node's immediate parent up to its root, node
    /// excluded, closest ancestor first. The descending `left` order is what
    /// lets callers render a breadcrumb without re-sorting.
    pub async fn ancestors(
        &self,
        table: &str,
        alias: &str,
        scope_column: &str,
        node_id: i64,
    ) -> Result<SelectStatement, NestedSetError> {
        let node = self.resolve(table, scope_column, node_id).await?;

        let condition = Condition::all()
            .add(Expr::col(column(alias, scope_column)).eq(node.scope))
            .add(Expr::col(column(alias, self.config.left_column())).lt(node.left))
            .add(Expr::col(column(alias, self.config.right_column())).gt(node.right));

        let mut select = from_table(table, alias);
        select
            .cond_where(condition)
            .order_by(column(alias, self.config.left_column()), Order::Desc);
        Ok(select)
    }

    /// One row per forest: every node at level zero, across all scopes.
    ///
    /// Ordered by id as a stable tie-break; no semantic ordering exists
    /// between independent trees.
    pub fn roots(&self, table: &str, alias: &str) -> SelectStatement {
        let mut select = from_table(table, alias);
        select
            .cond_where(Expr::col(column(alias, self.config.level_column())).eq(0i64))
            .order_by(column(alias, self.config.id_column()), Order::Asc);
        select
    }

    /// Union, over every id in `node_ids`, of the node's full ancestor chain,
    /// the node itself, and its descendants down to `depth` levels below it
    /// (`depth = 0` means none, `depth = 1` direct children, and so on).
    ///
    /// The whole id set is resolved before any predicate is built, so one
    /// unknown id fails the entire call and partial results are impossible.
    /// Rows are deduplicated by construction (a single predicate tree, not a
    /// union of queries) and ordered by `left` within each forest, forests in
    /// first-appearance order among `node_ids`.
    pub async fn subtree_through_multiple_nodes(
        &self,
        table: &str,
        alias: &str,
        scope_column: &str,
        node_ids: &[i64],
        depth: u32,
    ) -> Result<SelectStatement, NestedSetError> {
        let mut nodes = Vec::with_capacity(node_ids.len());
        for node_id in node_ids {
            nodes.push(self.resolve(table, scope_column, *node_id).await?);
        }

        let mut condition = Condition::any();
        if nodes.is_empty() {
            // An empty union selects nothing, not everything.
            condition = condition.add(Expr::value(false));
        }
        for node in &nodes {
            condition = condition.add(
                Condition::all()
                    .add(Expr::col(column(alias, scope_column)).eq(node.scope))
                    .add(
                        Condition::any()
                            .add(self.ancestors_and_self_of(alias, node))
                            .add(self.descendants_until(alias, node, depth)),
                    ),
            );
        }

        let mut select = from_table(table, alias);
        select.cond_where(condition);

        let scopes = first_appearance_scopes(&nodes);
        if scopes.len() > 1 {
            let mut rank = Expr::case(
                Expr::col(column(alias, scope_column)).eq(scopes[0]),
                Expr::value(0i64),
            );
            for (position, scope) in scopes.iter().enumerate().skip(1) {
                rank = rank.case(
                    Expr::col(column(alias, scope_column)).eq(*scope),
                    Expr::value(position as i64),
                );
            }
            select.order_by_expr(
                rank.finally(Expr::value(scopes.len() as i64)).into(),
                Order::Asc,
            );
        }
        select.order_by(column(alias, self.config.left_column()), Order::Asc);

        debug!(
            nodes = nodes.len(),
            forests = scopes.len().max(1),
            depth,
            "built multi-node subtree query"
        );

        Ok(select)
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

    fn children_of(&self, alias: &str, scope_column: &str, node: &NodeCoordinates) -> Condition {
        Condition::all()
            .add(Expr::col(column(alias, scope_column)).eq(node.scope))
            .add(
                Expr::col(column(alias, self.config.left_column()))
                    .between(node.left + 1, node.right - 1),
            )
            .add(Expr::col(column(alias, self.config.level_column())).eq(node.level + 1))
    }

    fn ancestors_and_self_of(&self, alias: &str, node: &NodeCoordinates) -> Condition {
        Condition::all()
            .add(Expr::col(column(alias, self.config.left_column())).lte(node.left))
            .add(Expr::col(column(alias, self.config.right_column())).gte(node.right))
    }

    fn descendants_until(&self, alias: &str, node: &NodeCoordinates, depth: u32) -> Condition {
        Condition::all()
            .add(Expr::col(column(alias, self.config.left_column())).gt(node.left))
            .add(Expr::col(column(alias, self.config.right_column())).lt(node.right))
            .add(
                Expr::col(column(alias, self.config.level_column()))
                    .lte(node.level + i64::from(depth)),
            )
    }
}

fn from_table(table: &str, alias: &str) -> SelectStatement {
    let mut select = Query::select();
    select.from_as(Alias::new(table), Alias::new(alias));
    select
}

fn column(alias: &str, name: &str) -> (Alias, Alias) {
    (Alias::new(alias), Alias::new(name))
}

fn first_appearance_scopes(nodes: &[NodeCoordinates]) -> Vec<i64> {
    let mut scopes = Vec::new();
    for node in nodes {
        if !scopes.contains(&node.scope) {
            scopes.push(node.scope);
        }
    }
    scopes
}
