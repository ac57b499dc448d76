//! Template cell id -> sending expression lookup for one agreement

use crate::expression::ExpressionBuilder;
use shared::{Agreement, ArticulationRecord};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Expressions keyed by template cell id
///
/// Only cells with a non-empty expression are present: a missing key means
/// the sending institution has nothing for that cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellExpressionMap {
    expressions: HashMap<String, String>,
}

impl CellExpressionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from decoded articulation records
    pub fn build(records: &[ArticulationRecord], builder: &ExpressionBuilder) -> Self {
        let mut map = Self::new();

        for record in records {
            let Some(cell_id) = record.cell_id() else {
                debug!("Skipping articulation without templateCellId");
                continue;
            };

            let expression = builder.build(record.sending());
            if expression.is_empty() {
                continue;
            }

            map.expressions.insert(cell_id.to_string(), expression);
        }

        map
    }

    /// Build the map straight from an agreement
    ///
    /// An undecodable `articulations` payload is logged and treated as an
    /// agreement without mappings.
    pub fn from_agreement(agreement: &Agreement, builder: &ExpressionBuilder) -> Self {
        match agreement.articulations() {
            Ok(records) => Self::build(&records, builder),
            Err(err) => {
                warn!(error = %err, agreement = agreement.name.as_deref().unwrap_or(""), "Ignoring articulations");
                Self::new()
            }
        }
    }

    pub fn get(&self, cell_id: &str) -> Option<&str> {
        self.expressions.get(cell_id).map(String::as_str)
    }

    pub fn contains(&self, cell_id: &str) -> bool {
        self.expressions.contains_key(cell_id)
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CellExpressionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            expressions: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(_, v): &(String, String)| !v.is_empty())
                .collect(),
        }
    }
}

/// Build a cell map with the default expression builder
pub fn build_cell_map(records: &[ArticulationRecord]) -> CellExpressionMap {
    CellExpressionMap::build(records, &ExpressionBuilder::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<ArticulationRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn articulated(cell_id: &str, prefix: &str, number: &str) -> Value {
        json!({
            "templateCellId": cell_id,
            "articulation": { "sendingArticulation": { "items": [{
                "type": "CourseGroup",
                "courseConjunction": "And",
                "items": [{ "type": "Course", "prefix": prefix, "courseNumber": number }]
            }]}}
        })
    }

    #[test]
    fn test_build_maps_cells() {
        let map = build_cell_map(&records(json!([
            articulated("a", "MATH", "1A"),
            articulated("b", "PHYS", "4A")
        ])));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("MATH 1A"));
        assert_eq!(map.get("b"), Some("PHYS 4A"));
    }

    #[test]
    fn test_no_articulation_is_absent() {
        let map = build_cell_map(&records(json!([
            {
                "templateCellId": "a",
                "articulation": { "sendingArticulation": {
                    "noArticulationReason": "No Course Articulated",
                    "items": []
                }}
            },
            articulated("b", "CHEM", "1A")
        ])));

        assert!(!map.contains("a"));
        assert_eq!(map.get("b"), Some("CHEM 1A"));
    }

    #[test]
    fn test_records_without_cell_id_or_articulation_are_skipped() {
        let map = build_cell_map(&records(json!([
            { "articulation": { "sendingArticulation": { "items": [] } } },
            { "templateCellId": "", "articulation": {} },
            { "templateCellId": "c" },
            { "templateCellId": "d", "articulation": { "sendingArticulation": "weird" } }
        ])));

        assert!(map.is_empty());
    }

    #[test]
    fn test_later_record_wins_for_same_cell() {
        let map = build_cell_map(&records(json!([
            articulated("a", "MATH", "1A"),
            articulated("a", "MATH", "1B")
        ])));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some("MATH 1B"));
    }

    #[test]
    fn test_from_agreement_tolerates_bad_payload() {
        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": "not json at all" })).unwrap();

        let map = CellExpressionMap::from_agreement(&agreement, &ExpressionBuilder::default());
        assert!(map.is_empty());
    }

    #[test]
    fn test_from_agreement_decodes_embedded_string() {
        let embedded = serde_json::to_string(&json!([articulated("x", "ENGL", "1A")])).unwrap();
        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": embedded })).unwrap();

        let map = CellExpressionMap::from_agreement(&agreement, &ExpressionBuilder::default());
        assert_eq!(map.get("x"), Some("ENGL 1A"));
    }

    #[test]
    fn test_from_iter_drops_empty_expressions() {
        let map: CellExpressionMap = [("x", "E"), ("y", "")].into_iter().collect();

        assert_eq!(map.get("x"), Some("E"));
        assert!(!map.contains("y"));
    }
}
