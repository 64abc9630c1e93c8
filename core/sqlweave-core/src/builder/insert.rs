//! INSERT builder
//!
//! Columns and rows come either from explicit calls
//! (`into_table` + `values`) or from entity metadata
//! (`from_object`, `from_many_objects`).

use super::{Statement, collect_args, join_names};
use crate::error::{WeaveError, WeaveResult};
use crate::schema::resolver::{column_values, resolve};
use crate::schema::Entity;
use crate::value::{Arg, IntoArg};
use std::fmt;

/// INSERT statement builder.
#[derive(Debug, Clone, Default)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    /// Number of values in each row, in insertion order.
    row_widths: Vec<usize>,
    args: Vec<Arg>,
}

impl Insert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target table and its column list.
    pub fn into_table<I, S>(mut self, table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.table = table.to_string();
        self.columns = columns
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        self
    }

    /// Appends one row.
    ///
    /// The row's width is not checked against the column list here; see
    /// [`Insert::validate`].
    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoArg,
    {
        let row = collect_args(values);
        self.row_widths.push(row.len());
        self.args.extend(row);
        self
    }

    /// Derives columns and the first row from `obj`'s plain-column fields.
    ///
    /// Must be the first thing that adds columns or rows. When no table was
    /// set the entity's table name is used.
    pub fn from_object(self, obj: &dyn Entity) -> WeaveResult<Self> {
        self.ensure_pristine("Insert::from_object")?;
        self.push_first_object(obj)
    }

    /// Columns from the first object, then one row per object.
    ///
    /// Every object is assumed to share the first object's shape.
    pub fn from_many_objects<E: Entity>(self, objects: &[E]) -> WeaveResult<Self> {
        self.ensure_pristine("Insert::from_many_objects")?;
        let Some((first, rest)) = objects.split_first() else {
            return Err(WeaveError::EmptyInput(
                "Insert::from_many_objects needs at least one object".to_string(),
            ));
        };

        let mut insert = self.push_first_object(first)?;
        let resolved = resolve(first.meta())?;
        for obj in rest {
            let (_, row) = column_values(obj, &resolved)?;
            insert = insert.values(row);
        }
        Ok(insert)
    }

    fn push_first_object(mut self, obj: &dyn Entity) -> WeaveResult<Self> {
        let meta = obj.meta();
        let resolved = resolve(meta)?;
        let (columns, row) = column_values(obj, &resolved)?;

        if self.table.is_empty() {
            self.table = meta.table_name.to_string();
        }
        self.columns = columns.into_iter().map(str::to_string).collect();
        Ok(self.values(row))
    }

    fn ensure_pristine(&self, context: &str) -> WeaveResult<()> {
        if !self.columns.is_empty() {
            return Err(WeaveError::Misuse {
                message: "insert already has columns".to_string(),
                context: context.to_string(),
            });
        }
        if !self.row_widths.is_empty() {
            return Err(WeaveError::Misuse {
                message: "object values must be the first row of the insert".to_string(),
                context: context.to_string(),
            });
        }
        Ok(())
    }

    /// Checks the table, the column list and every row's width.
    pub fn validate(&self) -> WeaveResult<()> {
        if self.table.is_empty() || self.columns.is_empty() {
            return Err(WeaveError::Misuse {
                message: "insert has no table or no columns".to_string(),
                context: "Insert::validate".to_string(),
            });
        }
        if let Some((row, width)) = self
            .row_widths
            .iter()
            .enumerate()
            .find(|(_, width)| **width != self.columns.len())
        {
            return Err(WeaveError::Misuse {
                message: format!(
                    "row {row} has {width} values for {} columns",
                    self.columns.len()
                ),
                context: "Insert::validate".to_string(),
            });
        }
        Ok(())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_widths.len()
    }
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            join_names(&self.columns)
        )?;
        let group = format!("({})", vec!["?"; self.columns.len()].join(", "));
        let groups = vec![group.as_str(); self.row_widths.len()];
        f.write_str(&groups.join(", "))
    }
}

impl Statement for Insert {
    fn args(&self) -> Vec<Arg> {
        self.args.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::schema::fixtures::{Broken, Contact, Person};

    fn contact(name: &'static str, email: &'static str, age: i32) -> Contact {
        Contact { name, email, age }
    }

    #[test]
    fn test_two_rows() {
        let insert = Insert::new()
            .into_table("t", ["a", "b"])
            .values([1, 2])
            .values([3, 4]);

        assert_eq!(insert.render(), "INSERT INTO t (a, b) VALUES (?, ?), (?, ?)");
        assert_eq!(
            insert.args(),
            vec![Arg::Int32(1), Arg::Int32(2), Arg::Int32(3), Arg::Int32(4)]
        );
        assert!(insert.validate().is_ok());
    }

    #[test]
    fn test_mismatched_row_renders_unchecked() {
        // Rendering trusts the caller: a short row still gets a full placeholder group.
        let insert = Insert::new()
            .into_table("t", ["a", "b"])
            .values([1, 2])
            .values([3]);

        assert_eq!(insert.render(), "INSERT INTO t (a, b) VALUES (?, ?), (?, ?)");
        assert_eq!(insert.args().len(), 3);
        assert!(matches!(insert.validate(), Err(WeaveError::Misuse { .. })));
    }

    #[test]
    fn test_from_object() {
        let insert = Insert::new().from_object(&contact("x", "y", 5)).unwrap();

        assert_eq!(insert.columns(), ["name", "email", "age"]);
        assert_eq!(insert.row_count(), 1);
        assert_eq!(insert.args(), args!["x", "y", 5]);
        assert_eq!(
            insert.render(),
            "INSERT INTO contacts (name, email, age) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn test_from_object_keeps_explicit_table() {
        let insert = Insert::new()
            .into_table("people", Vec::<String>::new())
            .from_object(&contact("x", "y", 5))
            .unwrap();
        assert_eq!(insert.table(), "people");
    }

    #[test]
    fn test_from_object_skips_relation_fields() {
        let mut person = Person::new("shmuli", "shmuli@example.com", 30);
        person.referred.push(Person::new("berel", "berel@example.com", 30));

        let insert = Insert::new().from_object(&person).unwrap();
        assert_eq!(insert.columns(), ["name", "email", "age"]);
        assert_eq!(insert.args().len(), 3);
    }

    #[test]
    fn test_from_object_after_row_is_misuse() {
        let err = Insert::new()
            .into_table("contacts", Vec::<&str>::new())
            .values(args!["a", "b", 1])
            .from_object(&contact("x", "y", 5))
            .unwrap_err();
        assert!(matches!(err, WeaveError::Misuse { .. }));
    }

    #[test]
    fn test_from_object_after_columns_is_misuse() {
        let err = Insert::new()
            .into_table("contacts", ["name"])
            .from_object(&contact("x", "y", 5))
            .unwrap_err();
        assert!(matches!(err, WeaveError::Misuse { .. }));
    }

    #[test]
    fn test_from_object_missing_column() {
        let err = Insert::new()
            .from_object(&Broken {
                name: "a",
                nickname: "b",
            })
            .unwrap_err();
        assert!(matches!(err, WeaveError::Configuration { .. }));
    }

    #[test]
    fn test_from_many_objects() {
        let contacts = vec![contact("a", "a@x", 1), contact("b", "b@x", 2), contact("c", "c@x", 3)];
        let insert = Insert::new().from_many_objects(&contacts).unwrap();

        assert_eq!(
            insert.render(),
            "INSERT INTO contacts (name, email, age) VALUES (?, ?, ?), (?, ?, ?), (?, ?, ?)"
        );
        assert_eq!(
            insert.args(),
            args!["a", "a@x", 1, "b", "b@x", 2, "c", "c@x", 3]
        );
    }

    #[test]
    fn test_from_many_objects_empty() {
        let err = Insert::new()
            .from_many_objects::<Contact>(&[])
            .unwrap_err();
        assert!(matches!(err, WeaveError::EmptyInput(_)));
    }

    #[test]
    fn test_from_many_objects_on_used_insert() {
        let err = Insert::new()
            .into_table("contacts", ["name"])
            .values(["z"])
            .from_many_objects(&[contact("a", "a@x", 1)])
            .unwrap_err();
        assert!(matches!(err, WeaveError::Misuse { .. }));
    }

    #[test]
    fn test_validate_requires_table_and_columns() {
        assert!(Insert::new().validate().is_err());
        assert!(Insert::new().into_table("t", ["a"]).validate().is_ok());
    }
}
