//! Database schema and migrations for mini-drive.
//!
//! Migrations are applied sequentially when the database is opened.
//! The schema_version table tracks which migrations have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    //
    // Note: email uniqueness is deliberately NOT enforced at the storage
    // level; signup performs a pre-insert existence check instead. Two
    // concurrent signups with the same email can therefore race.
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL DEFAULT '',
    email       TEXT NOT NULL,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: files table, one row per stored file
    r#"
CREATE TABLE files (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    original_name TEXT NOT NULL,
    stored_name   TEXT NOT NULL UNIQUE,  -- <uuid><original extension>
    content_type  TEXT NOT NULL,
    size          INTEGER NOT NULL,
    user_id       INTEGER NOT NULL REFERENCES users(id),
    file_uuid     TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_user_id ON files(user_id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
        for m in MIGRATIONS {
            assert!(!m.trim().is_empty());
        }
    }

    #[test]
    fn test_no_storage_level_email_uniqueness() {
        // The duplicate-email check lives in the signup handler, not the schema.
        assert!(!MIGRATIONS[0].contains("email       TEXT NOT NULL UNIQUE"));
    }
}
