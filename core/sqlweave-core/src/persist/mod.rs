//! Recursive Persister — 객체 그래프를 INSERT 문으로 펼친다
//!
//! 부모를 먼저 INSERT하고, 생성된 id를 one-to-many 자식의 foreign key
//! 컬럼으로 주입하면서 깊이 우선으로 내려간다.
//!
//! ```text
//! User(root)            → INSERT ... → id 1
//! ├─ User               → INSERT ... refered_by = 1 → id 2
//! └─ User               → INSERT ... refered_by = 1 → id 3
//!    └─ User            → INSERT ... refered_by = 3 → id 4
//! ```
//!
//! Many-to-many 필드는 join table 이름만 계산하고 저장하지 않는다
//! ([`PersistReport::pending_joins`]).

pub mod executor;

pub use executor::{ExecutedInsert, IdAllocator, RecordingExecutor, StatementExecutor};

use crate::builder::Insert;
use crate::config::{ErrorPolicy, PersistConfig};
use crate::error::{WeaveError, WeaveResult};
use crate::schema::resolver::{column_values, related_values};
use crate::schema::{Entity, FieldKind, join_table_name, resolve};
use crate::value::Arg;
use std::collections::BTreeMap;

/// Extra column/value pairs appended after an entity's own columns.
pub type ExtraColumns = BTreeMap<String, Arg>;

/// A many-to-many relation whose join rows were not written.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTable {
    pub join_table: String,
    pub owner_table: &'static str,
    pub owner_id: Arg,
    pub field: &'static str,
    /// Number of related elements at the time of the walk.
    pub related: usize,
}

/// A child subtree dropped under [`ErrorPolicy::SkipSubtree`].
#[derive(Debug)]
pub struct SkippedSubtree {
    pub table: &'static str,
    pub parent_id: Arg,
    pub error: WeaveError,
}

#[derive(Debug, Default)]
pub struct PersistReport {
    /// Statements accepted by the executor.
    pub submitted: usize,
    pub pending_joins: Vec<JoinTable>,
    pub skipped: Vec<SkippedSubtree>,
}

/// Walks an object graph and submits one INSERT per object.
pub struct Persister<E> {
    executor: E,
    on_error: ErrorPolicy,
    report: PersistReport,
}

impl<E: StatementExecutor> Persister<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            on_error: ErrorPolicy::default(),
            report: PersistReport::default(),
        }
    }

    pub fn with_config(mut self, config: &PersistConfig) -> Self {
        self.on_error = config.on_error;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    pub fn report(&self) -> &PersistReport {
        &self.report
    }

    pub fn take_report(&mut self) -> PersistReport {
        std::mem::take(&mut self.report)
    }

    /// Persists a root object with no extra columns.
    pub fn persist(&mut self, obj: &dyn Entity) -> WeaveResult<Arg> {
        self.persist_tree(obj, ExtraColumns::new())
    }

    /// Inserts `obj` with `extra_columns`, then its one-to-many children.
    ///
    /// Returns the identifier generated for `obj`. The whole node is
    /// resolved before anything is submitted.
    pub fn persist_tree(
        &mut self,
        obj: &dyn Entity,
        extra_columns: ExtraColumns,
    ) -> WeaveResult<Arg> {
        let meta = obj.meta();
        let resolved = resolve(meta)?;

        let mut joins = Vec::new();
        for field in &resolved {
            if let FieldKind::ManyToMany { .. } = field.kind {
                let join_table = join_table_name(meta, field.meta)?;
                let related = related_values(obj, field)?.len();
                joins.push((join_table, field.meta.ident, related));
            }
        }

        let (own_columns, mut values) = column_values(obj, &resolved)?;
        let mut columns: Vec<String> = own_columns.into_iter().map(str::to_string).collect();
        for (column, value) in extra_columns {
            columns.push(column);
            values.push(value);
        }

        let insert = Insert::new()
            .into_table(meta.table_name, &columns)
            .values(values);
        let id = self.executor.execute_insert(&insert)?;
        self.report.submitted += 1;
        tracing::debug!(entity = meta.type_name, table = meta.table_name, id = %id, "persisted node");

        for field in &resolved {
            match field.kind {
                FieldKind::Column => {}
                FieldKind::OneToMany { foreign_key } => {
                    for child in related_values(obj, field)? {
                        let extra = ExtraColumns::from([(foreign_key.to_string(), id.clone())]);
                        if let Err(error) = self.persist_tree(child, extra) {
                            if self.on_error == ErrorPolicy::Abort {
                                return Err(error);
                            }
                            tracing::warn!(
                                entity = child.meta().type_name,
                                parent_id = %id,
                                error = %error,
                                "skipping failed subtree"
                            );
                            self.report.skipped.push(SkippedSubtree {
                                table: child.meta().table_name,
                                parent_id: id.clone(),
                                error,
                            });
                        }
                    }
                }
                FieldKind::ManyToMany { .. } => {}
            }
        }

        for (join_table, field, related) in joins {
            tracing::debug!(
                entity = meta.type_name,
                field,
                join_table = %join_table,
                related,
                "many-to-many join rows not persisted"
            );
            self.report.pending_joins.push(JoinTable {
                join_table,
                owner_table: meta.table_name,
                owner_id: id.clone(),
                field,
                related,
            });
        }

        Ok(id)
    }
}
