//! Requirement template walk
//!
//! Assets are visited in `position` order. A `RequirementTitle` sets the title
//! for every course cell after it until the next title; course cells whose id
//! has a sending expression become output rows.

use crate::cell_map::CellExpressionMap;
use shared::{AssetKind, Cell, CourseCell, OutputRow, SectionNode, TemplateAsset, DEFAULT_TITLE};

/// Walk the template with the default "Requirements" title
pub fn walk_template(assets: &[TemplateAsset], expressions: &CellExpressionMap) -> Vec<OutputRow> {
    walk_template_with_title(assets, expressions, DEFAULT_TITLE)
}

/// Walk the template, using `default_title` before the first title asset and
/// for titles with blank content
pub fn walk_template_with_title(
    assets: &[TemplateAsset],
    expressions: &CellExpressionMap,
    default_title: &str,
) -> Vec<OutputRow> {
    let mut ordered: Vec<&TemplateAsset> = assets.iter().collect();
    // Stable: assets sharing a position keep document order
    ordered.sort_by(|a, b| a.position.total_cmp(&b.position));

    let (_, rows) = ordered.into_iter().fold(
        (default_title.to_string(), Vec::new()),
        |(title, mut rows), asset| match &asset.kind {
            AssetKind::RequirementTitle { content } => {
                (resolve_title(content.as_deref(), default_title), rows)
            }
            AssetKind::RequirementGroup { sections } => {
                rows.extend(group_rows(sections, &title, expressions));
                (title, rows)
            }
            AssetKind::Other => (title, rows),
        },
    );

    rows
}

fn resolve_title(content: Option<&str>, default_title: &str) -> String {
    match content.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => default_title.to_string(),
    }
}

fn group_rows<'a>(
    sections: &'a [SectionNode],
    title: &'a str,
    expressions: &'a CellExpressionMap,
) -> impl Iterator<Item = OutputRow> + 'a {
    sections
        .iter()
        .filter_map(|node| match node {
            SectionNode::Section(section) => Some(section),
            SectionNode::Other => None,
        })
        .flat_map(|section| section.rows.iter())
        .flat_map(|row| row.cells.iter())
        .filter_map(move |cell| match cell {
            Cell::Course(course) => course_row(course, title, expressions),
            Cell::Other => None,
        })
}

fn course_row(cell: &CourseCell, title: &str, expressions: &CellExpressionMap) -> Option<OutputRow> {
    let for_course = cell.course_code()?;
    let cell_id = cell.cell_id()?;
    let sending_equivalent = expressions.get(cell_id)?;

    Some(OutputRow {
        requirement_title: title.to_string(),
        for_course,
        sending_equivalent: sending_equivalent.to_string(),
    })
}
