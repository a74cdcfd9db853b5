use crate::{
    ctx::BaseParams,
    openapi::{
        aide::{
            axum::{routing::get, ApiRouter, IntoApiResponse},
            NoApi,
        },
        Json, Path, Query,
    },
    state::AppState,
};
use axum::http::StatusCode;

use schemars::JsonSchema;

use serde::Deserialize;

use super::{handlers, FindRemindersQuery, FindRemindersResponse, Reminder, UpdateReminder};

#[derive(Debug, Deserialize, JsonSchema)]
struct ReminderIdPath {
    reminder_id: String,
}

pub fn router(state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/api/v1/reminders",
            get(find_reminders).post_with(create_reminder, |t| t.response::<201, Json<Reminder>>()),
        )
        .api_route(
            "/api/v1/reminders/{reminder_id}",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .with_state(state)
}

async fn find_reminders(NoApi(base): NoApi<BaseParams>, Query(query): Query<FindRemindersQuery>) -> impl IntoApiResponse {
    handlers::find_reminders(query, base)
        .await
        .map(|results| Json(FindRemindersResponse { results }))
}

async fn create_reminder(NoApi(base): NoApi<BaseParams>, Json(args): Json<Reminder>) -> impl IntoApiResponse {
    handlers::create_reminder(args, base)
        .await
        .map(|r| (StatusCode::CREATED, Json(r)))
}

async fn get_reminder(
    Path(ReminderIdPath { reminder_id }): Path<ReminderIdPath>,
    NoApi(base): NoApi<BaseParams>,
) -> impl IntoApiResponse {
    handlers::get_reminder(reminder_id, base).await.map(Json)
}

async fn update_reminder(
    Path(ReminderIdPath { reminder_id }): Path<ReminderIdPath>,
    NoApi(base): NoApi<BaseParams>,
    Json(args): Json<UpdateReminder>,
) -> impl IntoApiResponse {
    handlers::update_reminder(reminder_id, args, base).await.map(Json)
}

async fn delete_reminder(
    Path(ReminderIdPath { reminder_id }): Path<ReminderIdPath>,
    NoApi(base): NoApi<BaseParams>,
) -> impl IntoApiResponse {
    handlers::delete_reminder(reminder_id, base).await.map(Json)
}

#[cfg(test)]
mod tests {
    use crate::{
        db::{init_test_db, DB},
        errors::Result,
        reminders::{FindRemindersResponse, Reminder},
    };
    use axum_test::TestServer;
    use serde_json::json;

    async fn seeded_db() -> Result<DB> {
        let db = init_test_db().await?;

        db.call(|conn| {
            conn.execute_batch(
                r#"
                INSERT INTO reminders (reminder_id, reminder_name) VALUES ('r1', 'Doctor');
                INSERT INTO reminders (reminder_id, reminder_name) VALUES ('r2', 'Gym');
                INSERT INTO reminders (reminder_id, reminder_name) VALUES ('r3', 'Gym');
                "#,
            )?;
            Ok(())
        })
        .await?;

        Ok(db)
    }

    #[tokio::test]
    async fn find_reminders() -> Result<()> {
        let server = test_server(seeded_db().await?).await?;

        let response = server.get("/api/v1/reminders").await;

        assert_eq!(response.status_code(), 200);
        let results = response.json::<FindRemindersResponse>().results;
        assert_eq!(
            results.iter().map(|r| r.reminder_id.as_str()).collect::<Vec<_>>(),
            ["r1", "r2", "r3"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn find_reminders_by_name() -> Result<()> {
        let server = test_server(seeded_db().await?).await?;

        let response = server.get("/api/v1/reminders").add_query_param("name", "Gym").await;

        let results = response.json::<FindRemindersResponse>().results;
        assert_eq!(results, vec![Reminder::new("r2", "Gym"), Reminder::new("r3", "Gym")]);
        Ok(())
    }

    #[tokio::test]
    async fn create_reminder() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;

        let response = server
            .post("/api/v1/reminders")
            .json(&json!({
                "reminderId": "weekly",
                "reminderName": "Weekly"
            }))
            .await;

        assert_eq!(response.status_code(), 201);
        assert_eq!(response.json::<Reminder>(), Reminder::new("weekly", "Weekly"));
        Ok(())
    }

    #[tokio::test]
    async fn create_duplicate_reminder() -> Result<()> {
        let server = test_server(seeded_db().await?).await?;

        let response = server
            .post("/api/v1/reminders")
            .json(&json!({
                "reminderId": "r1",
                "reminderName": "Dentist"
            }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), 409);
        assert_eq!(
            server.get("/api/v1/reminders/r1").await.json::<Reminder>().reminder_name,
            "Doctor"
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_reminder() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;

        let response = server.get("/api/v1/reminders/nope").expect_failure().await;

        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn update_reminder() -> Result<()> {
        let server = test_server(seeded_db().await?).await?;

        let response = server
            .put("/api/v1/reminders/r2")
            .json(&json!({ "reminderName": "Swim" }))
            .await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<Reminder>(), Reminder::new("r2", "Swim"));

        let missing = server
            .put("/api/v1/reminders/nope")
            .json(&json!({ "reminderName": "Swim" }))
            .expect_failure()
            .await;
        assert_eq!(missing.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn delete_reminder() -> Result<()> {
        let db = seeded_db().await?;
        let server = test_server(db.clone()).await?;

        let response = server.delete("/api/v1/reminders/r1").await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<Reminder>().reminder_name, "Doctor");

        let count = db
            .call(|conn| {
                conn.query_row::<u32, _, _>("select count(*) from reminders", [], |r| r.get(0))
                    .map_err(|e| e.into())
            })
            .await?;
        assert_eq!(count, 2);

        let again = server.delete("/api/v1/reminders/r1").expect_failure().await;
        assert_eq!(again.status_code(), 404);
        Ok(())
    }

    async fn test_server(db: DB) -> Result<TestServer> {
        crate::tests::test_server(db, super::router).await
    }
}
