//! Date comparison rules.
//!
//! `after` and `before` share one offset compiler/comparator; the rule
//! modules only pin the rule name, the default message, and the direction
//! of the comparison.

pub mod after;
pub mod before;
pub mod offset;
