//! # ASSIST Articulation
//!
//! Turns one agreement's articulation records and requirement template into
//! flat rows: receiving-side course, the requirement title it sits under, and
//! the sending-side course expression that satisfies it.
//!
//! Everything here is synchronous and pure over its inputs.

pub mod cell_map;
pub mod expression;
pub mod extract;
pub mod honors;
pub mod walker;

pub use cell_map::{build_cell_map, CellExpressionMap};
pub use expression::{build_expression, Conjunction, ExpressionBuilder};
pub use extract::{dedup_records, AgreementContext, Extractor};
pub use honors::is_honors_alternative;
pub use walker::{walk_template, walk_template_with_title};
