//! CLI Commands

pub mod expr;
pub mod extract;
pub mod receivers;

pub use expr::ExprCommand;
pub use extract::ExtractCommand;
pub use receivers::ReceiversCommand;
