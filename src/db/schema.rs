//! Database schema and migrations for Gatepost.
//!
//! Migrations are applied sequentially when the database is opened.
//! All timestamps are stored as UTC TEXT in `YYYY-MM-DD HH:MM:SS` format,
//! comparable with SQLite's `datetime('now')`.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Members table, keyed by email
    r#"
-- Members table. Email is the identity and never changes.
CREATE TABLE members (
    email       TEXT PRIMARY KEY,
    password    TEXT NOT NULL,           -- Argon2 hash
    name        TEXT NOT NULL UNIQUE,
    picture     TEXT NOT NULL DEFAULT '/profile_image.png',
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: Email verification codes, one row per email, upserted in place
    r#"
CREATE TABLE email_verifications (
    email       TEXT PRIMARY KEY,
    code        TEXT NOT NULL,           -- 6-digit numeric string
    created_at  TEXT NOT NULL,
    expires_at  TEXT NOT NULL,
    verified    INTEGER NOT NULL DEFAULT 0
);
"#,
    // v3: Posts, addressed externally by a random code
    r#"
CREATE TABLE posts (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    code             TEXT NOT NULL UNIQUE,   -- UUID v4, used in public URLs
    owner_email      TEXT NOT NULL REFERENCES members(email) ON DELETE CASCADE,
    title            TEXT NOT NULL,
    content          TEXT NOT NULL,
    view_count       INTEGER NOT NULL DEFAULT 0,
    read_permission  INTEGER NOT NULL DEFAULT 0,  -- 0: public, 1: code-only
    write_permission INTEGER NOT NULL DEFAULT 0,  -- 0: members-only, 1: anonymous allowed
    start_date       TEXT NOT NULL,
    end_date         TEXT                          -- NULL means unbounded
);

CREATE INDEX idx_posts_owner_email ON posts(owner_email);
CREATE INDEX idx_posts_read_permission ON posts(read_permission);
CREATE INDEX idx_posts_start_date ON posts(start_date);
"#,
    // v4: Refresh tokens for the session adapter
    r#"
CREATE TABLE refresh_tokens (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    member_email  TEXT NOT NULL REFERENCES members(email) ON DELETE CASCADE,
    token         TEXT NOT NULL UNIQUE,
    expires_at    TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    revoked_at    TEXT
);

CREATE INDEX idx_refresh_tokens_member_email ON refresh_tokens(member_email);
"#,
];
