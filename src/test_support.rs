//! Helpers shared by the database-backed tests.
//!
//! Those tests are `#[ignore]`d and need a reachable Postgres at `TEST_PGURL`:
//! `TEST_PGURL=postgres://... cargo test -- --include-ignored`.

use std::{
    io,
    sync::{Arc, Mutex},
};

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing_subscriber::fmt::MakeWriter;

use crate::migrator::run_migrations;

pub async fn pool() -> PgPool {
    let url = std::env::var("TEST_PGURL").expect("TEST_PGURL must be set for database tests");

    let db = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("could not connect to TEST_PGURL");
    run_migrations(&db).await.expect("schema bootstrap failed");

    db
}

/// A pool that never connects, for exercising paths that must not touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_millis(100))
        .connect_lazy("postgres://quotebook@127.0.0.1:1/unused")
        .expect("static url parses")
}

/// `prefix` followed by a random suffix; fits `authors.name` for short prefixes.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", uuid::Uuid::new_v4().simple())
}

/// Buffer for a thread-local subscriber installed by [`capture_logs`].
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes events on the current thread into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
