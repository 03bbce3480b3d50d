use crate::cell_value::CellValue;
use indexmap::IndexMap;

/// A tree-shaped record: attribute keys and data-column paths both sit
/// at string keys, data-column leaves are the original scalar values.
/// `IndexMap` is used (rather than `HashMap`) so key emission order
/// matches insertion order deterministically: attribute columns first,
/// then data columns in index order.
pub type Record = IndexMap<String, RecordNode>;

/// A node in a [`Record`]'s tree: either a leaf scalar or a nested map
/// created while walking a data column's header path.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordNode {
    Leaf(CellValue),
    Map(Record),
}

impl RecordNode {
    #[must_use]
    pub fn as_leaf(&self) -> Option<&CellValue> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Map(_) => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Record> {
        match self {
            Self::Map(m) => Some(m),
            Self::Leaf(_) => None,
        }
    }
}

/// Insert `value` at `path` within `record`, creating intermediate maps
/// as needed. Two data columns whose paths share a prefix share the
/// same intermediate maps, since `entry().or_insert` reuses whatever is
/// already there.
///
/// Returns `Err(())` — a path collision (see `PathCollision`) — if a
/// path step that must be a map already holds a scalar leaf, or the
/// final step already holds a map.
pub fn insert_path(record: &mut Record, path: &[String], value: CellValue) -> Result<(), ()> {
    debug_assert!(!path.is_empty());
    let mut current = record;
    for key in &path[..path.len() - 1] {
        let entry = current
            .entry(key.clone())
            .or_insert_with(|| RecordNode::Map(Record::new()));
        match entry {
            RecordNode::Map(m) => current = m,
            RecordNode::Leaf(_) => return Err(()),
        }
    }
    let last = &path[path.len() - 1];
    match current.get(last) {
        Some(RecordNode::Map(_)) => Err(()),
        _ => {
            current.insert(last.clone(), RecordNode::Leaf(value));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_prefix_builds_one_intermediate_map() {
        let mut record = Record::new();
        insert_path(
            &mut record,
            &["Group".into(), "Sub-A".into(), "x".into()],
            CellValue::float(1.0),
        )
        .unwrap();
        insert_path(
            &mut record,
            &["Group".into(), "Sub-B".into(), "y".into()],
            CellValue::float(2.0),
        )
        .unwrap();

        let group = record.get("Group").unwrap().as_map().unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.contains_key("Sub-A"));
        assert!(group.contains_key("Sub-B"));
    }

    #[test]
    fn scalar_then_map_at_same_key_is_a_collision() {
        let mut record = Record::new();
        insert_path(&mut record, &["A".into()], CellValue::Int(1)).unwrap();
        let err = insert_path(&mut record, &["A".into(), "B".into()], CellValue::Int(2));
        assert!(err.is_err());
    }

    #[test]
    fn map_then_scalar_at_same_key_is_a_collision() {
        let mut record = Record::new();
        insert_path(&mut record, &["A".into(), "B".into()], CellValue::Int(1)).unwrap();
        let err = insert_path(&mut record, &["A".into()], CellValue::Int(2));
        assert!(err.is_err());
    }
}
