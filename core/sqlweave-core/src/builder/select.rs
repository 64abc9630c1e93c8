//! SELECT builder

use super::{Statement, and_condition, collect_args, join_names};
use crate::value::{Arg, IntoArg};
use std::fmt;

/// SELECT statement builder.
///
/// `select`, `join`, `left_join` and `where_` accumulate; every other
/// section is replaced by the last call.
#[derive(Debug, Clone, Default)]
pub struct Select {
    select_section: String,
    from_section: String,
    join_section: String,
    where_section: String,
    group_section: String,
    having_section: String,
    order_section: String,
    limit_section: Option<u64>,
    offset_section: Option<u64>,
    where_args: Vec<Arg>,
    having_args: Vec<Arg>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends columns to the select list.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = join_names(columns);
        if columns.is_empty() {
            return self;
        }
        if !self.select_section.is_empty() {
            self.select_section.push_str(", ");
        }
        self.select_section.push_str(&columns);
        self
    }

    pub fn from(mut self, table: &str) -> Self {
        self.from_section = table.to_string();
        self
    }

    pub fn join(mut self, table: &str, on_condition: &str) -> Self {
        self.join_section
            .push_str(&format!(" JOIN {table} ON {on_condition}"));
        self
    }

    pub fn left_join(mut self, table: &str, on_condition: &str) -> Self {
        self.join_section
            .push_str(&format!(" LEFT JOIN {table} ON {on_condition}"));
        self
    }

    /// `AND`s `condition` onto the WHERE clause and appends its arguments.
    pub fn where_<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoArg,
    {
        and_condition(&mut self.where_section, condition);
        self.where_args.extend(collect_args(args));
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.group_section = join_names(columns);
        self
    }

    /// Replaces the HAVING condition together with its arguments.
    pub fn having<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoArg,
    {
        self.having_section = condition.to_string();
        self.having_args = collect_args(args);
        self
    }

    pub fn order_by(mut self, order: &str) -> Self {
        self.order_section = order.to_string();
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit_section = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset_section = Some(n);
        self
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.select_section.is_empty() {
            write!(f, "SELECT *")?;
        } else {
            write!(f, "SELECT {}", self.select_section)?;
        }
        if !self.from_section.is_empty() {
            write!(f, " FROM {}", self.from_section)?;
        }
        f.write_str(&self.join_section)?;
        if !self.where_section.is_empty() {
            write!(f, " WHERE {}", self.where_section)?;
        }
        if !self.group_section.is_empty() {
            write!(f, " GROUP BY {}", self.group_section)?;
        }
        if !self.having_section.is_empty() {
            write!(f, " HAVING {}", self.having_section)?;
        }
        if !self.order_section.is_empty() {
            write!(f, " ORDER BY {}", self.order_section)?;
        }
        if let Some(limit) = self.limit_section {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset_section {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

impl Statement for Select {
    fn args(&self) -> Vec<Arg> {
        let mut args = self.where_args.clone();
        args.extend(self.having_args.iter().cloned());
        args
    }
}
