//! Relation metadata resolver
//!
//! Classifies the fields of an entity into plain columns and relations,
//! and derives many-to-many join-table names from relationship tags.

use super::{Entity, EntityMeta, FieldMeta, FieldValue, Relation};
use crate::error::{WeaveError, WeaveResult};
use crate::value::Arg;

/// Classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Column,
    OneToMany { foreign_key: &'static str },
    ManyToMany { tag: &'static str },
}

/// A field whose column name is known to be present.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedField {
    /// Position in `EntityMeta::fields`.
    pub index: usize,
    pub column: &'static str,
    pub kind: FieldKind,
    pub meta: &'static FieldMeta,
}

impl ResolvedField {
    pub fn is_relation(&self) -> bool {
        !matches!(self.kind, FieldKind::Column)
    }
}

/// Resolves every field of `meta`, in declaration order.
///
/// Fails on the first field without a column name.
pub fn resolve(meta: &'static EntityMeta) -> WeaveResult<Vec<ResolvedField>> {
    meta.fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let column = field
                .column
                .ok_or_else(|| WeaveError::missing_column(meta.type_name, field.ident))?;
            let kind = match field.relation {
                None => FieldKind::Column,
                Some(Relation::OneToMany { foreign_key }) => FieldKind::OneToMany { foreign_key },
                Some(Relation::ManyToMany { tag }) => FieldKind::ManyToMany { tag },
            };
            Ok(ResolvedField {
                index,
                column,
                kind,
                meta: field,
            })
        })
        .collect()
}

/// Finds the field whose column name is `name`.
pub fn find_by_column_name(
    meta: &'static EntityMeta,
    name: &str,
) -> WeaveResult<&'static FieldMeta> {
    meta.fields
        .iter()
        .find(|field| field.column == Some(name))
        .ok_or_else(|| WeaveError::FieldNotFound {
            entity: meta.type_name.to_string(),
            column: name.to_string(),
        })
}

/// Parsed `"<thisRole>-<otherRole>"` relationship tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationTag<'a> {
    pub this_role: &'a str,
    pub other_role: &'a str,
}

impl<'a> RelationTag<'a> {
    /// Splits a tag into its two roles.
    ///
    /// Exactly one `-` is accepted. `"a-b-c"` is rejected rather than
    /// truncated to `a`/`b` as a naive split would do, so schemas relying
    /// on extra segments must be rewritten.
    pub fn parse(tag: &'a str) -> Option<Self> {
        let (this_role, other_role) = tag.split_once('-')?;
        if this_role.is_empty() || other_role.is_empty() || other_role.contains('-') {
            return None;
        }
        Some(Self {
            this_role,
            other_role,
        })
    }
}

fn parse_tag(
    entity: &EntityMeta,
    field: &FieldMeta,
    tag: &'static str,
) -> WeaveResult<RelationTag<'static>> {
    RelationTag::parse(tag).ok_or_else(|| WeaveError::Configuration {
        entity: entity.type_name.to_string(),
        field: field.ident.to_string(),
        reason: format!("malformed many-to-many tag '{tag}', expected '<role>-<otherRole>'"),
    })
}

/// Derives the join-table name of a many-to-many field.
///
/// The element type must declare a reciprocal field whose column is this
/// tag's other role; the name is `<thisRole>_<reciprocal thisRole>`.
pub fn join_table_name(meta: &'static EntityMeta, field: &FieldMeta) -> WeaveResult<String> {
    let Some(Relation::ManyToMany { tag }) = field.relation else {
        return Err(WeaveError::Configuration {
            entity: meta.type_name.to_string(),
            field: field.ident.to_string(),
            reason: "not a many-to-many field".to_string(),
        });
    };
    let this = parse_tag(meta, field, tag)?;

    let target_meta = field.target.ok_or_else(|| WeaveError::Configuration {
        entity: meta.type_name.to_string(),
        field: field.ident.to_string(),
        reason: "relation field has no element type".to_string(),
    })?;
    let target = target_meta();

    let reciprocal = find_by_column_name(target, this.other_role)?;
    let Some(Relation::ManyToMany { tag: reciprocal_tag }) = reciprocal.relation else {
        return Err(WeaveError::Configuration {
            entity: target.type_name.to_string(),
            field: reciprocal.ident.to_string(),
            reason: format!(
                "reciprocal of '{}.{}' has no many-to-many tag",
                meta.type_name, field.ident
            ),
        });
    };
    let that = parse_tag(target, reciprocal, reciprocal_tag)?;

    let join_table = format!("{}_{}", this.this_role, that.this_role);
    tracing::trace!(
        entity = meta.type_name,
        field = field.ident,
        target = target.type_name,
        join_table = %join_table,
        "resolved many-to-many join table"
    );
    Ok(join_table)
}

/// Plain-column names and values of `obj`, in declaration order.
pub(crate) fn column_values(
    obj: &dyn Entity,
    resolved: &[ResolvedField],
) -> WeaveResult<(Vec<&'static str>, Vec<Arg>)> {
    let meta = obj.meta();
    let mut columns = Vec::with_capacity(resolved.len());
    let mut values = Vec::with_capacity(resolved.len());

    for field in resolved.iter().filter(|f| !f.is_relation()) {
        match obj.field_value(field.index) {
            Some(FieldValue::Scalar(value)) => {
                tracing::trace!(entity = meta.type_name, column = field.column, value = %value, "adding column");
                columns.push(field.column);
                values.push(value);
            }
            _ => {
                return Err(WeaveError::Configuration {
                    entity: meta.type_name.to_string(),
                    field: field.meta.ident.to_string(),
                    reason: "column field did not yield a scalar value".to_string(),
                });
            }
        }
    }
    Ok((columns, values))
}

/// Related elements of a relation field.
pub(crate) fn related_values<'a>(
    obj: &'a dyn Entity,
    field: &ResolvedField,
) -> WeaveResult<Vec<&'a dyn Entity>> {
    match obj.field_value(field.index) {
        Some(FieldValue::Related(children)) => Ok(children),
        _ => Err(WeaveError::Configuration {
            entity: obj.meta().type_name.to_string(),
            field: field.meta.ident.to_string(),
            reason: "relation field did not yield related entities".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::{Broken, Contact, Person};

    static LONELY_META: EntityMeta = EntityMeta {
        type_name: "Lonely",
        table_name: "Lonely",
        fields: &[
            FieldMeta::column("name", "name"),
            FieldMeta::many_to_many("friends", "friends", "friend-buddies", lonely_meta),
        ],
    };

    fn lonely_meta() -> &'static EntityMeta {
        &LONELY_META
    }

    static ONE_SIDED_META: EntityMeta = EntityMeta {
        type_name: "OneSided",
        table_name: "OneSided",
        fields: &[
            FieldMeta::column("peers", "peers"),
            FieldMeta::many_to_many("likes", "likes", "liker-peers", one_sided_meta),
        ],
    };

    fn one_sided_meta() -> &'static EntityMeta {
        &ONE_SIDED_META
    }

    #[test]
    fn test_resolve_classifies_fields() {
        let fields = resolve(Person::entity_meta()).unwrap();
        let kinds: Vec<_> = fields.iter().map(|f| (f.column, f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("name", FieldKind::Column),
                ("email", FieldKind::Column),
                ("age", FieldKind::Column),
                (
                    "othersRefered",
                    FieldKind::OneToMany {
                        foreign_key: "refered_by"
                    }
                ),
                (
                    "worksFor",
                    FieldKind::ManyToMany {
                        tag: "boss-workers"
                    }
                ),
                (
                    "workers",
                    FieldKind::ManyToMany {
                        tag: "worker-worksFor"
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_resolve_missing_column_is_fatal() {
        let err = resolve(Broken::entity_meta()).unwrap_err();
        match err {
            WeaveError::Configuration { entity, field, .. } => {
                assert_eq!(entity, "Broken");
                assert_eq!(field, "nickname");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_find_by_column_name() {
        let field = find_by_column_name(Person::entity_meta(), "worksFor").unwrap();
        assert_eq!(field.ident, "works_for");

        let err = find_by_column_name(Contact::entity_meta(), "phone").unwrap_err();
        assert!(matches!(err, WeaveError::FieldNotFound { ref column, .. } if column == "phone"));
    }

    #[test]
    fn test_relation_tag_parse() {
        assert_eq!(
            RelationTag::parse("boss-workers"),
            Some(RelationTag {
                this_role: "boss",
                other_role: "workers"
            })
        );
        assert_eq!(RelationTag::parse("boss"), None);
        assert_eq!(RelationTag::parse("-workers"), None);
        assert_eq!(RelationTag::parse("a-b-c"), None);
    }

    #[test]
    fn test_join_table_name_from_reciprocal_tags() {
        let meta = Person::entity_meta();
        let works_for = find_by_column_name(meta, "worksFor").unwrap();
        assert_eq!(join_table_name(meta, works_for).unwrap(), "boss_worker");
    }

    #[test]
    fn test_join_table_name_missing_reciprocal() {
        let meta = lonely_meta();
        let friends = find_by_column_name(meta, "friends").unwrap();
        let err = join_table_name(meta, friends).unwrap_err();
        assert!(matches!(err, WeaveError::FieldNotFound { ref column, .. } if column == "buddies"));
    }

    #[test]
    fn test_join_table_name_reciprocal_without_tag() {
        let meta = one_sided_meta();
        let likes = find_by_column_name(meta, "likes").unwrap();
        let err = join_table_name(meta, likes).unwrap_err();
        assert!(matches!(err, WeaveError::Configuration { ref field, .. } if field == "peers"));
    }

    #[test]
    fn test_join_table_name_rejects_plain_field() {
        let meta = Person::entity_meta();
        let name = find_by_column_name(meta, "name").unwrap();
        assert!(join_table_name(meta, name).is_err());
    }

    #[test]
    fn test_column_values_skip_relations() {
        let person = Person::new("berel", "berel@example.com", 30);
        let fields = resolve(person.meta()).unwrap();
        let (columns, values) = column_values(&person, &fields).unwrap();
        assert_eq!(columns, vec!["name", "email", "age"]);
        assert_eq!(
            values,
            vec![
                Arg::Utf8("berel".into()),
                Arg::Utf8("berel@example.com".into()),
                Arg::Int32(30)
            ]
        );
    }
}
