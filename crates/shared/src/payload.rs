//! Agreement payload types (matches the ASSIST articulation API)
//!
//! Every node the API distinguishes by a `type` string is an internally tagged
//! enum with a catch-all `Other` variant. Unknown kinds still decode, and the
//! pipeline decides what to skip with an exhaustive `match`.

use crate::course::{CourseCode, CourseSource};
use crate::error::{AssistError, Result};
use crate::lenient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Courses
// ============================================================================

/// Course object as embedded in template cells (`cell.course`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    #[serde(default, deserialize_with = "lenient::text")]
    pub prefix: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub course_number: Option<String>,
}

impl CourseSource for CourseRef {
    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn course_number(&self) -> Option<&str> {
        self.course_number.as_deref()
    }
}

/// Sending-side course item
///
/// The fields normally sit at the top level; a few payloads nest them under
/// `course` instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub prefix: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub course_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub course: Option<CourseRef>,
}

impl CourseSource for CourseItem {
    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn course_number(&self) -> Option<&str> {
        self.course_number.as_deref()
    }
}

impl CourseItem {
    /// Top-level code, falling back to the nested course object
    pub fn code(&self) -> Option<CourseCode> {
        self.course_code()
            .or_else(|| self.course.as_ref().and_then(|course| course.course_code()))
    }
}

// ============================================================================
// Sending articulation
// ============================================================================

/// Item inside a sending articulation or a course group
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SendingItem {
    CourseGroup(CourseGroup),
    Course(CourseItem),
    #[serde(other)]
    Other,
}

/// A set of sending courses combined by one conjunction
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGroup {
    /// Declared conjunction ("And" / "Or"), as sent
    #[serde(default, deserialize_with = "lenient::text")]
    pub course_conjunction: Option<String>,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub items: Vec<SendingItem>,
}

/// What the sending institution offers for one requirement cell
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "SendingArticulationPayload")]
pub enum SendingArticulation {
    /// The sending institution explicitly has no equivalent
    NotArticulated { reason: String },
    Items(Vec<SendingItem>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendingArticulationPayload {
    #[serde(default)]
    no_articulation_reason: Option<Value>,

    #[serde(default, deserialize_with = "lenient::seq")]
    items: Vec<SendingItem>,
}

impl From<SendingArticulationPayload> for SendingArticulation {
    fn from(payload: SendingArticulationPayload) -> Self {
        match payload.no_articulation_reason {
            Some(reason) if lenient::is_truthy(&reason) => {
                let reason = match reason {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                SendingArticulation::NotArticulated { reason }
            }
            _ => SendingArticulation::Items(payload.items),
        }
    }
}

/// One element of the agreement's `articulations` collection
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticulationRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub template_cell_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub articulation: Option<Articulation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Articulation {
    #[serde(default, deserialize_with = "lenient::object")]
    pub sending_articulation: Option<SendingArticulation>,
}

impl ArticulationRecord {
    /// Template cell this record articulates, if it names one
    pub fn cell_id(&self) -> Option<&str> {
        self.template_cell_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn sending(&self) -> Option<&SendingArticulation> {
        self.articulation
            .as_ref()
            .and_then(|a| a.sending_articulation.as_ref())
    }
}

// ============================================================================
// Template assets
// ============================================================================

/// Top-level node of the receiving institution's requirement template
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateAsset {
    /// Document order; titles apply to every later asset
    #[serde(default, deserialize_with = "lenient::position")]
    pub position: f64,

    #[serde(flatten)]
    pub kind: AssetKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AssetKind {
    RequirementTitle {
        #[serde(default, deserialize_with = "lenient::text")]
        content: Option<String>,
    },
    RequirementGroup {
        #[serde(default, deserialize_with = "lenient::seq")]
        sections: Vec<SectionNode>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SectionNode {
    Section(Section),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Cell {
    Course(CourseCell),
    #[serde(other)]
    Other,
}

/// Template cell holding one receiving-side course
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseCell {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub course: Option<CourseRef>,
}

impl CourseCell {
    pub fn cell_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn course_code(&self) -> Option<CourseCode> {
        self.course.as_ref().and_then(|course| course.course_code())
    }
}

// ============================================================================
// Agreement
// ============================================================================

/// A published agreement for one receiving institution and major
///
/// `articulations` and `templateAssets` arrive as JSON-encoded strings inside
/// the agreement; inline arrays are accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,

    #[serde(default)]
    pub articulations: Option<Value>,

    #[serde(default)]
    pub template_assets: Option<Value>,
}

impl Agreement {
    /// Read an agreement document, bare or wrapped in an API envelope
    pub fn from_document(document: Value) -> Result<Self> {
        let wrapped = document
            .as_object()
            .is_some_and(|o| o.contains_key("isSuccessful"));

        if wrapped {
            let envelope: ApiEnvelope<Agreement> = serde_json::from_value(document)?;
            envelope.into_result()
        } else {
            Ok(serde_json::from_value(document)?)
        }
    }

    /// Decode the articulation records
    ///
    /// Missing or empty collections yield no records. A collection that is
    /// present but not an array is an error; individual malformed records
    /// are skipped.
    pub fn articulations(&self) -> Result<Vec<ArticulationRecord>> {
        decode_embedded("articulations", self.articulations.as_ref())
    }

    /// Decode the template assets, with the same contract as `articulations`
    pub fn template_assets(&self) -> Result<Vec<TemplateAsset>> {
        decode_embedded("templateAssets", self.template_assets.as_ref())
    }

    pub fn has_template_assets(&self) -> bool {
        self.template_assets.as_ref().is_some_and(lenient::is_truthy)
    }
}

fn decode_embedded<T: DeserializeOwned>(field: &'static str, raw: Option<&Value>) -> Result<Vec<T>> {
    let elements: Option<Vec<Value>> = match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        // Embedded text must itself be an array; "null" or "{}" is malformed
        Some(Value::String(s)) => Some(
            serde_json::from_str::<Vec<Value>>(s)
                .map_err(|source| AssistError::Payload { field, source })?,
        ),
        Some(other) => Some(
            Vec::<Value>::deserialize(other).map_err(|source| AssistError::Payload { field, source })?,
        ),
    };

    Ok(elements.map(lenient::decode_all).unwrap_or_default())
}

/// Response wrapper used by every ASSIST API endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub is_successful: bool,

    #[serde(default)]
    pub result: Option<T>,

    #[serde(default)]
    pub validation_failure: Option<Value>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T> {
        if !self.is_successful {
            let reason = match self.validation_failure {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => "no reason given".to_string(),
            };
            return Err(AssistError::Upstream(reason));
        }

        self.result
            .ok_or_else(|| AssistError::Upstream("response carried no result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_item_top_level_fields() {
        let item: CourseItem =
            serde_json::from_value(json!({ "prefix": "MATH", "courseNumber": "1A" })).unwrap();
        assert_eq!(item.code().unwrap().as_str(), "MATH 1A");
    }

    #[test]
    fn test_course_item_falls_back_to_nested_course() {
        let item: CourseItem = serde_json::from_value(json!({
            "prefix": "",
            "course": { "prefix": "PHYS", "courseNumber": "4AH" }
        }))
        .unwrap();
        assert_eq!(item.code().unwrap().as_str(), "PHYS 4AH");
    }

    #[test]
    fn test_course_item_without_any_code() {
        let item: CourseItem = serde_json::from_value(json!({ "prefix": "MATH" })).unwrap();
        assert!(item.code().is_none());
    }

    #[test]
    fn test_sending_items_unknown_type_is_other() {
        let items: Vec<SendingItem> = serde_json::from_value(json!([
            { "type": "CourseGroup", "courseConjunction": "Or", "items": [] },
            { "type": "Requirement", "name": "whatever" },
            { "type": "Course", "prefix": "CIS", "courseNumber": "22A" }
        ]))
        .unwrap();

        assert!(matches!(items[0], SendingItem::CourseGroup(_)));
        assert!(matches!(items[1], SendingItem::Other));
        assert!(matches!(items[2], SendingItem::Course(_)));
    }

    #[test]
    fn test_course_group_drops_untyped_members() {
        let group: CourseGroup = serde_json::from_value(json!({
            "items": [
                { "prefix": "MATH", "courseNumber": "1A" },
                "garbage",
                { "type": "Course", "prefix": "MATH", "courseNumber": "1B" }
            ]
        }))
        .unwrap();

        assert_eq!(group.items.len(), 1);
        assert!(group.course_conjunction.is_none());
    }

    #[test]
    fn test_no_articulation_reason() {
        let sending: SendingArticulation = serde_json::from_value(json!({
            "noArticulationReason": "No Course Articulated",
            "items": [{ "type": "CourseGroup", "items": [] }]
        }))
        .unwrap();

        match sending {
            SendingArticulation::NotArticulated { reason } => {
                assert_eq!(reason, "No Course Articulated")
            }
            SendingArticulation::Items(_) => panic!("expected NotArticulated"),
        }
    }

    #[test]
    fn test_empty_no_articulation_reason_is_ignored() {
        let sending: SendingArticulation = serde_json::from_value(json!({
            "noArticulationReason": "",
            "items": [{ "type": "CourseGroup", "items": [] }]
        }))
        .unwrap();

        assert!(matches!(sending, SendingArticulation::Items(ref items) if items.len() == 1));
    }

    #[test]
    fn test_articulation_record_accessors() {
        let record: ArticulationRecord = serde_json::from_value(json!({
            "templateCellId": "cell-1",
            "articulation": { "sendingArticulation": { "items": [] } }
        }))
        .unwrap();

        assert_eq!(record.cell_id(), Some("cell-1"));
        assert!(record.sending().is_some());

        let record: ArticulationRecord =
            serde_json::from_value(json!({ "templateCellId": "", "articulation": "nope" })).unwrap();
        assert!(record.cell_id().is_none());
        assert!(record.sending().is_none());
    }

    #[test]
    fn test_template_asset_variants() {
        let assets: Vec<TemplateAsset> = serde_json::from_value(json!([
            { "type": "RequirementTitle", "position": 0, "content": "Lower Division" },
            { "type": "GeneralText", "position": 1, "content": "Note" },
            { "type": "RequirementGroup", "position": 2, "sections": [
                { "type": "Section", "rows": [{ "cells": [
                    { "type": "Course", "id": "x", "course": { "prefix": "MATH", "courseNumber": "31A" } },
                    { "type": "Series", "id": "y" }
                ]}]},
                { "type": "Divider" }
            ]}
        ]))
        .unwrap();

        assert_eq!(assets.len(), 3);
        assert!(matches!(
            assets[0].kind,
            AssetKind::RequirementTitle { content: Some(ref c) } if c == "Lower Division"
        ));
        assert!(matches!(assets[1].kind, AssetKind::Other));
        assert_eq!(assets[1].position, 1.0);

        let AssetKind::RequirementGroup { sections } = &assets[2].kind else {
            panic!("expected RequirementGroup");
        };
        assert!(matches!(sections[1], SectionNode::Other));
        let SectionNode::Section(section) = &sections[0] else {
            panic!("expected Section");
        };
        let cells = &section.rows[0].cells;
        match &cells[0] {
            Cell::Course(cell) => {
                assert_eq!(cell.cell_id(), Some("x"));
                assert_eq!(cell.course_code().unwrap().as_str(), "MATH 31A");
            }
            Cell::Other => panic!("expected Course cell"),
        }
        assert!(matches!(cells[1], Cell::Other));
    }

    #[test]
    fn test_agreement_embedded_string_collections() {
        let agreement: Agreement = serde_json::from_value(json!({
            "name": "Mathematics, B.S.",
            "articulations": "[{\"templateCellId\":\"a\"},{\"templateCellId\":\"b\"}]",
            "templateAssets": "[{\"type\":\"RequirementTitle\",\"position\":0,\"content\":\"T\"}]"
        }))
        .unwrap();

        assert_eq!(agreement.articulations().unwrap().len(), 2);
        assert_eq!(agreement.template_assets().unwrap().len(), 1);
        assert!(agreement.has_template_assets());
    }

    #[test]
    fn test_agreement_inline_arrays() {
        let agreement: Agreement = serde_json::from_value(json!({
            "articulations": [{ "templateCellId": "a" }, 17]
        }))
        .unwrap();

        assert_eq!(agreement.articulations().unwrap().len(), 1);
        assert!(agreement.template_assets().unwrap().is_empty());
        assert!(!agreement.has_template_assets());
    }

    #[test]
    fn test_agreement_missing_or_empty_collections() {
        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": "", "templateAssets": null })).unwrap();

        assert!(agreement.articulations().unwrap().is_empty());
        assert!(agreement.template_assets().unwrap().is_empty());
    }

    #[test]
    fn test_agreement_undecodable_articulations_is_error() {
        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": "{\"not\": \"an array\"}" })).unwrap();

        let err = agreement.articulations().unwrap_err();
        assert!(matches!(err, AssistError::Payload { field: "articulations", .. }));

        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": "[{\"templateCellId\"" })).unwrap();
        assert!(agreement.articulations().is_err());

        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": { "templateCellId": "a" } })).unwrap();
        assert!(agreement.articulations().is_err());

        let agreement: Agreement =
            serde_json::from_value(json!({ "articulations": "null", "templateAssets": "null" }))
                .unwrap();
        assert!(matches!(
            agreement.articulations().unwrap_err(),
            AssistError::Payload { field: "articulations", .. }
        ));
        assert!(matches!(
            agreement.template_assets().unwrap_err(),
            AssistError::Payload { field: "templateAssets", .. }
        ));
    }

    #[test]
    fn test_agreement_from_envelope() {
        let agreement = Agreement::from_document(json!({
            "isSuccessful": true,
            "result": { "name": "Physics, B.S." }
        }))
        .unwrap();
        assert_eq!(agreement.name.as_deref(), Some("Physics, B.S."));

        let err = Agreement::from_document(json!({
            "isSuccessful": false,
            "validationFailure": "Agreement not found"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Upstream request failed: Agreement not found");
    }

    #[test]
    fn test_agreement_from_bare_document() {
        let agreement = Agreement::from_document(json!({ "name": "Chemistry, B.S." })).unwrap();
        assert_eq!(agreement.name.as_deref(), Some("Chemistry, B.S."));
    }
}
