use crate::{
    error::TanamError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use tanam_api_structs::complete_reminder::{APIResponse, PathParams};
use tanam_domain::{Reminder, ReminderId, ID};
use tanam_infra::TanamContext;

fn handle_error(e: UseCaseErrors) -> TanamError {
    match e {
        UseCaseErrors::NotFound(reminder_id) => TanamError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            reminder_id
        )),
        UseCaseErrors::StorageError => TanamError::InternalError,
    }
}

pub async fn complete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TanamContext>,
) -> Result<HttpResponse, TanamError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = CompleteReminderUseCase {
        reminder_id: path_params.into_inner().reminder_id,
        user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse::new()))
        .map_err(handle_error)
}

/// Marks a stored reminder of the user as completed.
///
/// Completing an already completed reminder succeeds again and moves the
/// completion time to now.
#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub reminder_id: String,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TanamContext) -> Result<Self::Response, Self::Errors> {
        // Synthesized reminders have no stored row to complete
        let reminder_id = match self.reminder_id.parse::<ReminderId>() {
            Ok(ReminderId::Persisted(id)) => id,
            _ => return Err(UseCaseErrors::NotFound(self.reminder_id.clone())),
        };

        // The owner is part of the update predicate, so reminders of other
        // users are indistinguishable from missing ones
        match ctx
            .repos
            .reminders
            .complete(&reminder_id, &self.user_id, ctx.sys.now())
            .await
        {
            Ok(Some(reminder)) => Ok(reminder),
            Ok(None) => Err(UseCaseErrors::NotFound(self.reminder_id.clone())),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_utils::{StaticTimeSys, HOUR_MILLIS, START_TS};
    use std::sync::Arc;
    use tanam_domain::{PlantingHistory, ReminderType, SynthesizedReminder};

    async fn setup() -> (TanamContext, Reminder) {
        let mut ctx = TanamContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(START_TS));
        let now = ctx.sys.now();
        let reminder = Reminder::new(ID::new(), ReminderType::Fertilizing, "Pupuk", now, now);
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        (ctx, reminder)
    }

    #[actix_web::main]
    #[test]
    async fn completing_twice_is_idempotent() {
        let (mut ctx, reminder) = setup().await;

        let usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.as_string(),
            user_id: reminder.user_id.clone(),
        };
        let first = execute(usecase, &ctx).await.unwrap();
        assert!(first.is_completed);
        assert_eq!(first.completed_at, Some(ctx.sys.now()));

        ctx.sys = Arc::new(StaticTimeSys(START_TS + HOUR_MILLIS));
        let usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.as_string(),
            user_id: reminder.user_id.clone(),
        };
        let second = execute(usecase, &ctx).await.unwrap();
        assert!(second.is_completed);
        assert_eq!(second.completed_at, Some(ctx.sys.now()));
        assert_ne!(first.completed_at, second.completed_at);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_reminder_of_other_user() {
        let (ctx, reminder) = setup().await;

        let usecase = CompleteReminderUseCase {
            reminder_id: reminder.id.as_string(),
            user_id: ID::new(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::NotFound(_))));

        let stored = ctx
            .repos
            .reminders
            .find_by_user(&reminder.id, &reminder.user_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_completed);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_and_synthesized_ids() {
        let (ctx, reminder) = setup().await;
        let synthesized = SynthesizedReminder::watering(
            PlantingHistory::new(reminder.user_id.clone(), "Tomat").id,
            "Tomat",
            ctx.sys.now(),
        );

        for reminder_id in ["abc".to_string(), synthesized.id().to_string()] {
            let usecase = CompleteReminderUseCase {
                reminder_id,
                user_id: reminder.user_id.clone(),
            };
            let res = execute(usecase, &ctx).await;
            assert!(matches!(res, Err(UseCaseErrors::NotFound(_))));
        }
    }
}
