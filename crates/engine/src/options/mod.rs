//! Option list and option row views.
//!
//! Modules:
//! - `row`: single candidate display and activation predicate
//! - `list`: ordered rows plus the "select the active item" fan-out

mod list;
mod row;

pub use list::OptionList;
pub use row::OptionRow;
