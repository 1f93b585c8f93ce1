use super::IReminderRepo;
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};
use tanam_domain::{Reminder, ReminderType, ID};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    reminder_type: String,
    message: String,
    scheduled_date: DateTime<Utc>,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
    planting_history_uid: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        Ok(Reminder {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            reminder_type: raw.reminder_type.parse()?,
            message: raw.message,
            scheduled_date: raw.scheduled_date,
            is_completed: raw.is_completed,
            completed_at: raw.completed_at,
            planting_history_id: raw.planting_history_uid.map(ID::from),
            created_at: raw.created_at,
        })
    }
}

fn into_reminders(raws: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    raws.into_iter().map(Reminder::try_from).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, reminder_type, message, scheduled_date,
             is_completed, completed_at, planting_history_uid, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.reminder_type.as_str())
        .bind(&reminder.message)
        .bind(reminder.scheduled_date)
        .bind(reminder.is_completed)
        .bind(reminder.completed_at)
        .bind(reminder.planting_history_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_due(
        &self,
        user_id: &ID,
        scheduled_before: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1 AND
            r.is_completed = FALSE AND
            r.scheduled_date <= $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(scheduled_before)
        .fetch_all(&self.pool)
        .await?;
        into_reminders(raws)
    }

    async fn find_by_type_created_after(
        &self,
        user_id: &ID,
        reminder_type: ReminderType,
        created_after: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1 AND
            r.reminder_type = $2 AND
            r.created_at >= $3
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(reminder_type.as_str())
        .bind(created_after)
        .fetch_all(&self.pool)
        .await?;
        into_reminders(raws)
    }

    async fn find_by_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        let raw = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1 AND
            r.user_uid = $2
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        raw.map(Reminder::try_from).transpose()
    }

    async fn complete(
        &self,
        reminder_id: &ID,
        user_id: &ID,
        completed_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Reminder>> {
        let raw = sqlx::query_as::<_, ReminderRaw>(
            r#"
            UPDATE reminders
            SET is_completed = TRUE,
            completed_at = $3
            WHERE reminder_uid = $1 AND
            user_uid = $2
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(user_id.inner_ref())
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await?;
        raw.map(Reminder::try_from).transpose()
    }
}
