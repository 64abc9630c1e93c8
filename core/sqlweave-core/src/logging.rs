//! sqlweave 로그 출력
//!
//! 라이브러리는 `tracing` 이벤트만 남긴다. 레벨별 내용:
//!
//! | level | target | event |
//! |---|---|---|
//! | `info` | `sqlweave_core::executor` | `RecordingExecutor`가 받은 INSERT 한 건 (sql, args, id) |
//! | `debug` | `sqlweave_core::persist` | 저장된 노드 하나, 기록된 pending join 하나 |
//! | `warn` | `sqlweave_core::persist` | `SkipSubtree` 정책으로 건너뛴 자식 subtree |
//! | `trace` | `sqlweave_core::schema::resolver` | 컬럼 값 추출, join table 이름 계산 |
//!
//! 아래 함수들은 `logging` feature가 켜져 있을 때만 subscriber를 설치한다.

#[cfg(feature = "logging")]
use tracing_subscriber::{EnvFilter, fmt};

/// Prints every submitted statement and nothing from the resolver
///
/// # Environment Variables
/// - `RUST_LOG` - overrides the `sqlweave_core=info` filter
///
/// # Example
/// ```rust
/// sqlweave_core::logging::init();
/// ```
#[cfg(feature = "logging")]
pub fn init() {
    init_with_level("info")
}

/// Installs a subscriber showing sqlweave events at `level` and above
///
/// `level = "debug"` adds one line per persisted node and pending join.
/// Events from other crates are not shown unless `RUST_LOG` says so;
/// `RUST_LOG` takes precedence when it is set.
#[cfg(feature = "logging")]
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sqlweave_core={level}")));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Test subscriber at `trace`, routed through the test harness writer
///
/// Failing tests then show each statement alongside the column values
/// the resolver read for it.
#[cfg(feature = "logging")]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("sqlweave_core=trace"))
        .with_test_writer()
        .try_init();
}

// Stub implementations when logging feature is disabled
#[cfg(not(feature = "logging"))]
pub fn init() {}

#[cfg(not(feature = "logging"))]
pub fn init_with_level(_level: &str) {}

#[cfg(not(feature = "logging"))]
pub fn init_test() {}
