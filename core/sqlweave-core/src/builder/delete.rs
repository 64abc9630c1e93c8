//! DELETE builder

use super::{Statement, and_condition, collect_args};
use crate::value::{Arg, IntoArg};
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Delete {
    table: String,
    where_section: String,
    args: Vec<Arg>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn where_<I>(mut self, condition: &str, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoArg,
    {
        and_condition(&mut self.where_section, condition);
        self.args.extend(collect_args(args));
        self
    }
}

impl fmt::Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if !self.where_section.is_empty() {
            write!(f, " WHERE {}", self.where_section)?;
        }
        Ok(())
    }
}

impl Statement for Delete {
    fn args(&self) -> Vec<Arg> {
        self.args.clone()
    }
}
