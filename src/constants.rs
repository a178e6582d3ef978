use std::sync::LazyLock;

use time::OffsetDateTime;

pub mod version;

/// Maximum length of `authors.name`, mirroring the `VARCHAR(50)` column.
pub const AUTHOR_NAME_MAX_LEN: usize = 50;

pub static STARTUP_TIME: LazyLock<OffsetDateTime> = LazyLock::new(OffsetDateTime::now_utc);
