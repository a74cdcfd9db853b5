use rusqlite::{params, OptionalExtension, Row};
use sea_query::{Alias, Expr, Iden, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;

use crate::{ctx::BaseParams, Error, Result};

use super::{FindRemindersQuery, Reminder, UpdateReminder};

#[derive(Iden)]
pub enum Reminders {
    Table,
    ReminderId,
    ReminderName,
}

impl<'a> TryFrom<&Row<'a>> for Reminder {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            reminder_id: row.get(0)?,
            reminder_name: row.get(1)?,
        })
    }
}

pub(crate) fn select_reminders(
    conn: &rusqlite::Connection,
    name: Option<&str>,
) -> rusqlite::Result<Vec<Reminder>> {
    let (sql, values) = Query::select()
        .columns([Reminders::ReminderId, Reminders::ReminderName])
        .from(Reminders::Table)
        .and_where_option(name.map(|name| Expr::col(Reminders::ReminderName).eq(name)))
        .order_by(Alias::new("rowid"), Order::Asc)
        .build_rusqlite(SqliteQueryBuilder);

    let reminders = conn
        .prepare(&sql)?
        .query_map(&*values.as_params(), |row| Reminder::try_from(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(reminders)
}

pub(crate) fn select_reminder(conn: &rusqlite::Connection, reminder_id: &str) -> rusqlite::Result<Option<Reminder>> {
    let (sql, values) = Query::select()
        .columns([Reminders::ReminderId, Reminders::ReminderName])
        .from(Reminders::Table)
        .and_where(Expr::col(Reminders::ReminderId).eq(reminder_id))
        .build_rusqlite(SqliteQueryBuilder);

    conn.query_row(&sql, &*values.as_params(), |row| Reminder::try_from(row))
        .optional()
}

pub async fn find_reminders(query: FindRemindersQuery, BaseParams { db, .. }: BaseParams) -> Result<Vec<Reminder>> {
    db.call(move |conn| Ok(select_reminders(conn, query.name.as_deref())?))
        .await
        .map_err(Error::from)
}

pub async fn get_reminder(reminder_id: String, BaseParams { db, .. }: BaseParams) -> Result<Reminder> {
    db.call(move |conn| {
        select_reminder(conn, &reminder_id)?.ok_or_else(|| Error::NotFound("Reminder not found".into()).into())
    })
    .await
    .map_err(Error::from)
}

pub async fn create_reminder(reminder: Reminder, BaseParams { db, ctx }: BaseParams) -> Result<Reminder> {
    if reminder.reminder_id.is_empty() {
        return Err(Error::Validation("Reminder id is required".into()));
    }

    let created = db
        .call(move |conn| {
            if select_reminder(conn, &reminder.reminder_id)?.is_some() {
                return Err(Error::Conflict(format!("Reminder {} already exists", reminder.reminder_id)).into());
            }

            let (sql, values) = Query::insert()
                .into_table(Reminders::Table)
                .columns([Reminders::ReminderId, Reminders::ReminderName])
                .values_panic([reminder.reminder_id.clone().into(), reminder.reminder_name.clone().into()])
                .build_rusqlite(SqliteQueryBuilder);
            conn.execute(&sql, &*values.as_params())?;

            Ok(reminder)
        })
        .await
        .map_err(Error::from)?;

    tracing::debug!(request_id = ?ctx.request_id, reminder_id = %created.reminder_id, "reminder created");

    Ok(created)
}

pub async fn update_reminder(
    reminder_id: String,
    UpdateReminder { reminder_name }: UpdateReminder,
    BaseParams { db, .. }: BaseParams,
) -> Result<Reminder> {
    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE reminders SET reminder_name = ?
            WHERE reminder_id = ?
            RETURNING reminder_id, reminder_name"#,
            params![reminder_name, reminder_id],
            |row| Reminder::try_from(row),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound("Reminder not found".into()).into())
    })
    .await
    .map_err(Error::from)
}

pub async fn delete_reminder(reminder_id: String, BaseParams { db, .. }: BaseParams) -> Result<Reminder> {
    db.call(move |conn| {
        conn.query_row(
            r#"DELETE FROM reminders
            WHERE reminder_id = ?
            RETURNING reminder_id, reminder_name"#,
            params![reminder_id],
            |row| Reminder::try_from(row),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound("Reminder not found".into()).into())
    })
    .await
    .map_err(Error::from)
}
