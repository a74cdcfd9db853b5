use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![
        M::up(
            r#"
            CREATE TABLE notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,

                note_title TEXT NOT NULL,
                note_description TEXT NOT NULL DEFAULT '',

                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME
            );
        "#
        ),
        M::up(
            r#"
            CREATE TABLE reminders (
                reminder_id TEXT PRIMARY KEY NOT NULL,
                reminder_name TEXT NOT NULL,

                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
        "#
        ),
        // position keeps the note's reminder order and allows the same reminder twice
        M::up(
            r#"
            CREATE TABLE note_reminders (
                note_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                reminder_id TEXT NOT NULL,

                PRIMARY KEY (note_id, position),
                FOREIGN KEY (note_id) REFERENCES notes (id) ON DELETE CASCADE,
                FOREIGN KEY (reminder_id) REFERENCES reminders (reminder_id) ON DELETE CASCADE
            );
        "#
        ),
    ]);
}
