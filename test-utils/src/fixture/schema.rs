//! SQLite schemas for database tests.

/// Users keyed by id, with a unique email.
pub const USERS_TABLE: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
)";

/// Posts referencing their author in `users`.
pub const POSTS_TABLE: &str = "CREATE TABLE posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL REFERENCES users (id),
    title TEXT NOT NULL
)";

/// Inserts a user row.
pub fn insert_user(email: &str, name: &str) -> String {
    format!("INSERT INTO users (email, name) VALUES ('{email}', '{name}')")
}

/// Inserts a post row for the given author id.
pub fn insert_post(author_id: i64, title: &str) -> String {
    format!("INSERT INTO posts (author_id, title) VALUES ({author_id}, '{title}')")
}
