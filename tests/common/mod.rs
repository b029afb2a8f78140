#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use nested_set::{
    NestedSetConfig, NestedSetError, NestedSetQueryFactory, NodeCoordinates, NodeReader,
};

/// In-memory coordinate source over a fixed two-forest table:
///
/// forest 1: Root(1) > { Branch1(2) > Leaf1(3), Branch2(4) > Leaf2(5) }
/// forest 2: Root2(6)
pub struct StaticNodeReader {
    nodes: HashMap<i64, NodeCoordinates>,
}

impl StaticNodeReader {
    pub fn demo_forest() -> Self {
        let nodes = [
            node(1, 1, 10, 0, 1),
            node(2, 2, 5, 1, 1),
            node(3, 3, 4, 2, 1),
            node(4, 6, 9, 1, 1),
            node(5, 7, 8, 2, 1),
            node(6, 1, 2, 0, 2),
        ];
        Self {
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
        }
    }
}

#[async_trait]
impl NodeReader for StaticNodeReader {
    async fn read_coordinates(
        &self,
        _config: &NestedSetConfig,
        _table: &str,
        _scope_column: &str,
        node_id: i64,
    ) -> Result<NodeCoordinates, NestedSetError> {
        self.nodes
            .get(&node_id)
            .copied()
            .ok_or(NestedSetError::NodeNotFound { id: node_id })
    }
}

pub fn node(id: i64, left: i64, right: i64, level: i64, scope: i64) -> NodeCoordinates {
    NodeCoordinates {
        id,
        left,
        right,
        level,
        scope,
    }
}

pub fn config() -> NestedSetConfig {
    NestedSetConfig::new("id", "left", "right", "level").expect("valid column configuration")
}

pub fn factory() -> NestedSetQueryFactory<StaticNodeReader> {
    NestedSetQueryFactory::new(config(), StaticNodeReader::demo_forest())
}
