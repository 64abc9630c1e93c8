//! Entity metadata — statically declared field tables
//!
//! Every persisted type carries one [`EntityMeta`] built once (normally by
//! `#[derive(Entity)]`) and looked up at runtime:
//!
//! ```ignore
//! #[derive(Entity)]
//! pub struct User {
//!     #[weave(column = "name")]
//!     pub name: String,
//!     #[weave(column = "othersRefered", one_to_many = "refered_by")]
//!     pub others_refered: Vec<User>,
//!     #[weave(column = "worksFor", many_to_many = "boss-workers")]
//!     pub works_for: Vec<User>,
//! }
//! ```

pub mod resolver;

pub use resolver::{
    FieldKind, RelationTag, ResolvedField, find_by_column_name, join_table_name, resolve,
};

use crate::value::Arg;

/// Relation annotation of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Children get `foreign_key` set to the parent's generated id.
    OneToMany { foreign_key: &'static str },
    /// `"<thisRole>-<otherRole>"`
    ManyToMany { tag: &'static str },
}

/// One declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    /// Rust field name, used in error messages.
    pub ident: &'static str,
    /// `None` means the annotation is missing, which is a configuration error.
    pub column: Option<&'static str>,
    pub relation: Option<Relation>,
    /// Element type of a relation field.
    pub target: Option<fn() -> &'static EntityMeta>,
}

impl FieldMeta {
    pub const fn column(ident: &'static str, column: &'static str) -> Self {
        Self {
            ident,
            column: Some(column),
            relation: None,
            target: None,
        }
    }

    pub const fn one_to_many(
        ident: &'static str,
        column: &'static str,
        foreign_key: &'static str,
        target: fn() -> &'static EntityMeta,
    ) -> Self {
        Self {
            ident,
            column: Some(column),
            relation: Some(Relation::OneToMany { foreign_key }),
            target: Some(target),
        }
    }

    pub const fn many_to_many(
        ident: &'static str,
        column: &'static str,
        tag: &'static str,
        target: fn() -> &'static EntityMeta,
    ) -> Self {
        Self {
            ident,
            column: Some(column),
            relation: Some(Relation::ManyToMany { tag }),
            target: Some(target),
        }
    }

    /// A field declared without a column name.
    pub const fn unnamed(ident: &'static str) -> Self {
        Self {
            ident,
            column: None,
            relation: None,
            target: None,
        }
    }
}

/// Metadata table of a persisted type, fields in declaration order.
#[derive(Debug)]
pub struct EntityMeta {
    pub type_name: &'static str,
    pub table_name: &'static str,
    pub fields: &'static [FieldMeta],
}

/// Value of one field of an instance.
pub enum FieldValue<'a> {
    Scalar(Arg),
    Related(Vec<&'a dyn Entity>),
}

/// A persistable object.
///
/// Object safe, so a graph can mix entity types.
pub trait Entity {
    fn entity_meta() -> &'static EntityMeta
    where
        Self: Sized;

    fn meta(&self) -> &'static EntityMeta;

    /// Value of the field at `index` in `meta().fields`.
    fn field_value(&self, index: usize) -> Option<FieldValue<'_>>;
}

/// Collection type usable as a relation field.
pub trait Related {
    type Item: Entity;

    fn related(&self) -> Vec<&dyn Entity>;
}

impl<T: Entity> Related for Vec<T> {
    type Item = T;

    fn related(&self) -> Vec<&dyn Entity> {
        self.iter().map(|item| item as &dyn Entity).collect()
    }
}
