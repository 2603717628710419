//! Tests for TreeBuilder: reconstruction and internal-node filtering

use bbforest::domain::{
    DomainError, FieldValue, NodeId, Row, TreeBuilder, NODE_ID_FIELD, PARENT_ID_FIELD, VALUE_FIELD,
};

fn row(id: i64, parent: i64, value: f64) -> Row {
    Row::from_pairs([
        (NODE_ID_FIELD, FieldValue::Int(id)),
        (PARENT_ID_FIELD, FieldValue::Int(parent)),
        (VALUE_FIELD, FieldValue::Float(value)),
    ])
}

fn row_with_feature(id: i64, parent: i64, value: f64, feat_a: i64) -> Row {
    let mut r = row(id, parent, value);
    r.insert("feat_a", FieldValue::Int(feat_a));
    r
}

// ============================================================
// Construction Tests
// ============================================================

#[test]
fn given_two_level_table_when_building_then_parent_links_children_in_row_order() {
    // Arrange
    let rows = vec![
        row_with_feature(1, -1, 10.0, 1),
        row_with_feature(2, 1, 5.0, 2),
        row_with_feature(3, 1, 5.0, 3),
    ];

    // Act
    let tree = TreeBuilder::new().build(&rows, "instance_01.csv").unwrap();

    // Assert
    assert_eq!(tree.len(), 3);
    let root = tree.get(1).unwrap();
    let child_ids: Vec<NodeId> = root
        .children
        .iter()
        .map(|&idx| tree.node(idx).unwrap().id)
        .collect();
    assert_eq!(child_ids, vec![2, 3]);
    assert!(tree.get(2).unwrap().children.is_empty());
    assert!(tree.get(3).unwrap().children.is_empty());
}

#[test]
fn given_children_rows_before_parent_row_when_building_then_still_links() {
    // Child rows may precede their parent in the table; linking happens
    // only after every node exists.
    let rows = vec![row(2, 1, 5.0), row(3, 1, 5.0), row(1, -1, 10.0)];

    let tree = TreeBuilder::new().build(&rows, "t.csv").unwrap();

    let child_ids: Vec<NodeId> = tree
        .get(1)
        .unwrap()
        .children
        .iter()
        .map(|&idx| tree.node(idx).unwrap().id)
        .collect();
    assert_eq!(child_ids, vec![2, 3]);
}

#[test]
fn given_empty_rows_when_building_then_empty_tree() {
    let tree = TreeBuilder::new().build(&[], "empty.csv").unwrap();
    assert!(tree.is_empty());
}

#[test]
fn given_rows_when_building_then_node_count_matches_row_count() {
    let rows: Vec<Row> = (1..21).map(|i| row(i, i / 2, i as f64)).collect();

    let tree = TreeBuilder::new().build(&rows, "t.csv").unwrap();

    assert_eq!(tree.len(), rows.len());
}

#[test]
fn given_row_when_building_then_features_exclude_reserved_fields() {
    let rows = vec![row_with_feature(1, -1, 10.0, 42)];

    let tree = TreeBuilder::new().build(&rows, "t.csv").unwrap();

    let node = tree.get(1).unwrap();
    assert_eq!(node.source, "t.csv");
    assert_eq!(node.value, 10.0);
    assert_eq!(node.features.len(), 1);
    assert_eq!(node.features.get("feat_a"), Some(&FieldValue::Int(42)));
    assert!(node.features.get(NODE_ID_FIELD).is_none());
}

#[test]
fn given_integer_value_cell_when_building_then_value_is_numeric() {
    let mut r = row(1, -1, 0.0);
    r.insert(VALUE_FIELD, FieldValue::Int(10));

    let tree = TreeBuilder::new().build(&[r], "t.csv").unwrap();

    assert_eq!(tree.get(1).unwrap().value, 10.0);
}

// ============================================================
// Orphans and Roots
// ============================================================

#[test]
fn given_orphan_parent_when_building_then_node_is_nobodys_child() {
    // Parent id 99 matches no row: node 5 heads its own subtree.
    let rows = vec![row(5, 99, 1.0), row(6, 5, 2.0)];

    let tree = TreeBuilder::new().build(&rows, "t.csv").unwrap();

    let orphan_idx = tree.lookup(5).unwrap();
    let appearances: usize = tree
        .iter()
        .map(|(_, node)| node.children.iter().filter(|&&c| c == orphan_idx).count())
        .sum();
    assert_eq!(appearances, 0);
    assert_eq!(tree.roots(), vec![orphan_idx]);
}

#[test]
fn given_resolved_parent_when_building_then_child_appears_exactly_once() {
    let rows = vec![row(1, -1, 0.0), row(2, 1, 0.0), row(3, 2, 0.0)];

    let tree = TreeBuilder::new().build(&rows, "t.csv").unwrap();

    for child_id in [2, 3] {
        let child_idx = tree.lookup(child_id).unwrap();
        let appearances: usize = tree
            .iter()
            .map(|(_, node)| node.children.iter().filter(|&&c| c == child_idx).count())
            .sum();
        assert_eq!(
            appearances, 1,
            "node {} must have exactly one parent",
            child_id
        );
    }
}

// ============================================================
// Rejected Tables
// ============================================================

#[test]
fn given_duplicate_node_id_when_building_then_errors() {
    let rows = vec![row(1, -1, 0.0), row(1, -1, 1.0)];

    let result = TreeBuilder::new().build(&rows, "dup.csv");

    assert!(matches!(
        result,
        Err(DomainError::DuplicateNodeId { id: 1, .. })
    ));
}

#[test]
fn given_row_missing_value_field_when_building_then_errors() {
    let rows = vec![Row::from_pairs([
        (NODE_ID_FIELD, FieldValue::Int(1)),
        (PARENT_ID_FIELD, FieldValue::Int(-1)),
    ])];

    let result = TreeBuilder::new().build(&rows, "bad.csv");

    assert!(matches!(
        result,
        Err(DomainError::MissingField { field, .. }) if field == VALUE_FIELD
    ));
}

#[test]
fn given_text_node_id_when_building_then_errors() {
    let rows = vec![Row::from_pairs([
        (NODE_ID_FIELD, FieldValue::Text("root".to_string())),
        (PARENT_ID_FIELD, FieldValue::Int(-1)),
        (VALUE_FIELD, FieldValue::Float(0.0)),
    ])];

    let result = TreeBuilder::new().build(&rows, "bad.csv");

    assert!(matches!(
        result,
        Err(DomainError::FieldType { field, .. }) if field == NODE_ID_FIELD
    ));
}

// ============================================================
// Self-Parenting Rows (accepted hazard)
// ============================================================

#[test]
fn given_self_parenting_row_when_building_then_node_is_its_own_child() {
    let rows = vec![row(4, 4, 1.0)];
    let builder = TreeBuilder::new();

    let tree = builder.build(&rows, "loop.csv").unwrap();

    let idx = tree.lookup(4).unwrap();
    assert_eq!(tree.get(4).unwrap().children, vec![idx]);

    // Consistent with build: the node has a child, so the filter keeps it.
    let internal = builder.filter_internal(&tree, &tree.entries());
    assert!(internal.contains_key(&4));
}

// ============================================================
// Filtering Tests
// ============================================================

#[test]
fn given_two_level_table_when_filtering_then_only_root_is_retained() {
    let rows = vec![
        row_with_feature(1, -1, 10.0, 1),
        row_with_feature(2, 1, 5.0, 2),
        row_with_feature(3, 1, 5.0, 3),
    ];
    let builder = TreeBuilder::new();
    let tree = builder.build(&rows, "t.csv").unwrap();

    let internal = builder.filter_internal(&tree, &tree.entries());

    assert_eq!(internal.keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn given_single_row_when_filtering_then_empty_mapping() {
    let builder = TreeBuilder::new();
    let tree = builder.build(&[row(1, -1, 0.0)], "t.csv").unwrap();

    let internal = builder.filter_internal(&tree, &tree.entries());

    assert!(internal.is_empty());
}

#[test]
fn given_filtered_mapping_when_filtering_again_then_unchanged() {
    let rows = vec![
        row(1, -1, 0.0),
        row(2, 1, 0.0),
        row(3, 2, 0.0),
        row(4, 3, 0.0),
    ];
    let builder = TreeBuilder::new();
    let tree = builder.build(&rows, "t.csv").unwrap();

    let once = builder.filter_internal(&tree, &tree.entries());
    let twice = builder.filter_internal(&tree, &once);

    assert_eq!(once, twice);
}

#[test]
fn given_tree_when_filtering_then_input_is_not_mutated() {
    let rows = vec![row(1, -1, 0.0), row(2, 1, 0.0)];
    let builder = TreeBuilder::new();
    let tree = builder.build(&rows, "t.csv").unwrap();
    let entries_before = tree.entries();

    let _ = builder.filter_internal(&tree, &entries_before);

    assert_eq!(tree.entries(), entries_before);
    assert_eq!(tree.len(), 2);
    assert!(tree.get(2).unwrap().children.is_empty());
}

#[test]
fn given_build_output_when_filtering_then_filter_is_pure_predicate() {
    let rows = vec![
        row(1, -1, 0.0),
        row(2, 1, 0.0),
        row(3, 1, 0.0),
        row(4, 3, 0.0),
    ];
    let builder = TreeBuilder::new();
    let tree = builder.build(&rows, "t.csv").unwrap();

    let internal = builder.filter_internal(&tree, &tree.entries());

    let expected: Vec<NodeId> = tree
        .entries()
        .iter()
        .filter(|(_, &idx)| tree.node(idx).unwrap().is_internal())
        .map(|(&id, _)| id)
        .collect();
    assert_eq!(internal.keys().copied().collect::<Vec<_>>(), expected);
}
