//! Statement Builder — Fluent 스타일 SQL 조립
//!
//! 모든 builder는 값으로 체이닝된다 (`fn x(mut self, ..) -> Self`).
//! 분기가 필요하면 명시적으로 `.clone()` 한다.
//!
//! - [`Select`] — `SELECT .. FROM .. JOIN .. WHERE .. GROUP BY .. HAVING .. ORDER BY .. LIMIT .. OFFSET`
//! - [`Insert`] — `INSERT INTO t (cols) VALUES (?, ..), ..`
//! - [`Update`] — `UPDATE t SET .. WHERE ..`
//! - [`Delete`] — `DELETE FROM t WHERE ..`

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;

use crate::value::{Arg, IntoArg, interpolate};
use std::fmt;

/// Rendered statement plus its positional arguments.
///
/// `args()` is always in the order the `?` placeholders appear in `render()`.
pub trait Statement: fmt::Display {
    fn args(&self) -> Vec<Arg>;

    fn render(&self) -> String {
        self.to_string()
    }

    /// Placeholders replaced by literals. For logs only, never for execution.
    fn to_inline_sql(&self) -> String {
        interpolate(&self.render(), &self.args())
    }
}

/// Wraps a statement for use inside another one: `(SELECT ...)`.
pub fn sub_query(sub: &impl Statement) -> String {
    format!("({})", sub.render())
}

/// Appends `condition` to `section`, joining with `AND`.
pub(crate) fn and_condition(section: &mut String, condition: &str) {
    if !section.is_empty() {
        section.push_str(" AND ");
    }
    section.push_str(condition);
}

pub(crate) fn join_names<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn collect_args<I>(values: I) -> Vec<Arg>
where
    I: IntoIterator,
    I::Item: IntoArg,
{
    values.into_iter().map(IntoArg::into_arg).collect()
}
