//! # sqlweave — SQL 빌더와 재귀 객체 저장
//!
//! 두 가지를 제공한다:
//!
//! - **Statement Builders**: `SELECT / INSERT / UPDATE / DELETE` 텍스트와
//!   `?` placeholder 순서에 맞는 positional 인자 목록
//! - **Recursive Persister**: 필드 메타데이터(`#[derive(Entity)]`)로 객체
//!   그래프를 읽고, 객체마다 INSERT 하나씩 실행하며 부모 id를
//!   one-to-many 자식의 foreign key로 전달
//!
//! ## 빠른 시작
//!
//! ### 빌더
//!
//! ```rust
//! use sqlweave_core::{Select, Statement, Arg};
//!
//! let q = Select::new()
//!     .select(["id", "name"])
//!     .from("users")
//!     .where_("age > ?", [18])
//!     .where_("active = ?", [true])
//!     .limit(10);
//!
//! assert_eq!(
//!     q.render(),
//!     "SELECT id, name FROM users WHERE age > ? AND active = ? LIMIT 10"
//! );
//! assert_eq!(q.args(), vec![Arg::Int32(18), Arg::Boolean(true)]);
//! ```
//!
//! ### 객체 그래프 저장
//!
//! ```rust
//! use sqlweave_core::{Entity, Persister, RecordingExecutor};
//!
//! #[derive(Entity)]
//! struct User {
//!     #[weave(column = "name")]
//!     name: String,
//!     #[weave(column = "othersRefered", one_to_many = "refered_by")]
//!     others_refered: Vec<User>,
//! }
//!
//! # fn main() -> sqlweave_core::WeaveResult<()> {
//! let root = User {
//!     name: "shmuli".into(),
//!     others_refered: vec![User { name: "berel".into(), others_refered: vec![] }],
//! };
//!
//! let mut persister = Persister::new(RecordingExecutor::new());
//! persister.persist(&root)?;
//!
//! let executed = persister.executor().executed();
//! assert_eq!(executed[1].sql, "INSERT INTO User (name, refered_by) VALUES (?, ?)");
//! # Ok(())
//! # }
//! ```
//!
//! ## 모듈 구조
//!
//! - [`builder`] — Select / Insert / Update / Delete
//! - [`schema`] — 엔티티 메타데이터와 relation resolver
//! - [`persist`] — 재귀 persister, statement executor, id allocator
//! - [`config`] — persister 설정 (env / JSON)

pub mod builder;
pub mod config;
pub mod error;
pub mod persist;
pub mod schema;
pub mod value;

// Logging utilities
pub mod logging;

// Re-export commonly used types
pub use builder::{Delete, Insert, Select, Statement, Update, sub_query};
pub use config::{ErrorPolicy, PersistConfig};
pub use error::{WeaveError, WeaveResult};
pub use persist::{
    ExtraColumns, IdAllocator, PersistReport, Persister, RecordingExecutor, StatementExecutor,
};
pub use schema::{Entity, EntityMeta, FieldMeta, FieldValue, Related, Relation};
pub use value::{Arg, IntoArg};

// Re-export derive macros
pub use sqlweave_derive::Entity;
