//! Sending-side articulation -> boolean course expression
//!
//! A sending articulation is a list of course groups. Each group renders as
//! its course codes joined by the group's conjunction, parenthesised when it
//! holds more than one course; groups are then joined with "and". The one
//! exception is an expression made of a single OR group, which is left bare.
//!
//! ```text
//! [MATH 1A] (And), [PHYS 4A, PHYS 4AH] (And)  ->  MATH 1A and (PHYS 4A or PHYS 4AH)
//! [CIS 22A, CIS 22B] (And)                    ->  (CIS 22A and CIS 22B)
//! [ENGL 1A, ESL 5] (Or)                       ->  ENGL 1A or ESL 5
//! ```

use crate::honors::is_honors_alternative;
use shared::{CourseCode, CourseGroup, SendingArticulation, SendingItem};
use std::fmt;

/// How the courses of one group combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    /// Map the payload's declared conjunction; anything but "or" is AND
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared {
            Some(raw) if raw.trim().eq_ignore_ascii_case("or") => Conjunction::Or,
            _ => Conjunction::And,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Builds course expressions from sending articulations
#[derive(Debug, Clone, Copy)]
pub struct ExpressionBuilder {
    /// Force OR on groups that are a course plus its honors section
    honors_override: bool,
}

impl Default for ExpressionBuilder {
    fn default() -> Self {
        Self {
            honors_override: true,
        }
    }
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: enable or disable the honors override
    pub fn with_honors_override(mut self, enabled: bool) -> Self {
        self.honors_override = enabled;
        self
    }

    pub fn honors_override(&self) -> bool {
        self.honors_override
    }

    /// Render a sending articulation; empty when nothing is articulated
    ///
    /// A lone alternative group comes back without parentheses
    /// (`PHYS 4A or PHYS 4AH`); a lone AND group keeps them.
    pub fn build(&self, sending: Option<&SendingArticulation>) -> String {
        let items = match sending {
            Some(SendingArticulation::Items(items)) => items,
            Some(SendingArticulation::NotArticulated { .. }) | None => return String::new(),
        };

        let groups: Vec<RenderedGroup> = items
            .iter()
            .filter_map(|item| match item {
                SendingItem::CourseGroup(group) => self.render_group(group),
                SendingItem::Course(_) | SendingItem::Other => None,
            })
            .collect();

        match groups.as_slice() {
            // Only a lone OR group drops its parentheses (`ENGL 1A or ESL 5`).
            // A lone AND group and every group of a multi-group expression
            // keep the `wrapped()` form.
            [only] if only.conjunction == Conjunction::Or => only.joined.clone(),
            _ => groups
                .iter()
                .map(RenderedGroup::wrapped)
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }

    /// Render one course group, or `None` if it yields no course codes
    pub fn group_expression(&self, group: &CourseGroup) -> Option<String> {
        self.render_group(group).map(|rendered| rendered.wrapped())
    }

    fn render_group(&self, group: &CourseGroup) -> Option<RenderedGroup> {
        let codes: Vec<CourseCode> = group
            .items
            .iter()
            .filter_map(|item| match item {
                SendingItem::Course(course) => course.code(),
                SendingItem::CourseGroup(_) | SendingItem::Other => None,
            })
            .collect();

        if codes.is_empty() {
            return None;
        }

        let conjunction = self.resolve_conjunction(group.course_conjunction.as_deref(), &codes);
        let joined = codes
            .iter()
            .map(CourseCode::as_str)
            .collect::<Vec<_>>()
            .join(&format!(" {} ", conjunction));

        Some(RenderedGroup {
            conjunction,
            joined,
            len: codes.len(),
        })
    }

    fn resolve_conjunction(&self, declared: Option<&str>, codes: &[CourseCode]) -> Conjunction {
        if self.honors_override && is_honors_alternative(codes) {
            return Conjunction::Or;
        }
        Conjunction::from_declared(declared)
    }
}

struct RenderedGroup {
    conjunction: Conjunction,
    joined: String,
    len: usize,
}

impl RenderedGroup {
    fn wrapped(&self) -> String {
        if self.len > 1 {
            format!("({})", self.joined)
        } else {
            self.joined.clone()
        }
    }
}

/// Build an expression with the default builder (honors override on)
pub fn build_expression(sending: Option<&SendingArticulation>) -> String {
    ExpressionBuilder::default().build(sending)
}
