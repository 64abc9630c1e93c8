//! UPDATE builder

use super::{Statement, and_condition, collect_args};
use crate::value::{Arg, IntoArg};
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Update {
    table: String,
    set_section: String,
    where_section: String,
    set_args: Vec<Arg>,
    where_args: Vec<Arg>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    /// Replaces the SET assignments together with their arguments.
    pub fn set<I>(mut self, assignments: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoArg,
    {
        self.set_section = assignments.to_string();
        self.set_args = collect_args(args);
        self
    }

    pub fn where_<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoArg,
    {
        and_condition(&mut self.where_section, condition);
        self.where_args.extend(collect_args(args));
        self
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET {}", self.table, self.set_section)?;
        if !self.where_section.is_empty() {
            write!(f, " WHERE {}", self.where_section)?;
        }
        Ok(())
    }
}

impl Statement for Update {
    fn args(&self) -> Vec<Arg> {
        let mut args = self.set_args.clone();
        args.extend(self.where_args.iter().cloned());
        args
    }
}
