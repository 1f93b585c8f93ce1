use crate::{
    error::TanamError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Duration;
use tanam_api_structs::get_upcoming_reminders::to_response;
use tanam_domain::{reconcile_due_reminders, DueReminder, ReminderType, ID};
use tanam_infra::TanamContext;
use tracing::error;

fn handle_error(e: UseCaseErrors) -> TanamError {
    match e {
        UseCaseErrors::StorageError => TanamError::TransientFetchError,
    }
}

pub async fn get_upcoming_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<TanamContext>,
) -> Result<HttpResponse, TanamError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetUpcomingRemindersUseCase { user_id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(to_response(reminders)))
        .map_err(handle_error)
}

/// Reconciles the stored reminders of a user with the watering reminders
/// synthesized for the plantings that have not gotten one recently
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = Vec<DueReminder>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TanamContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();
        let due_before = now + Duration::milliseconds(ctx.config.upcoming_reminders_horizon);
        let recent_after = now - Duration::milliseconds(ctx.config.recent_watering_window);

        // Either all three queries succeed or no list is returned at all
        let (due, active_plantings, recent_watering) = futures::try_join!(
            ctx.repos.reminders.find_due(&self.user_id, due_before),
            ctx.repos.planting_histories.find_active(&self.user_id),
            ctx.repos.reminders.find_by_type_created_after(
                &self.user_id,
                ReminderType::Watering,
                recent_after
            ),
        )
        .map_err(|e| {
            error!("Unable to fetch reminders for user {}: {:?}", self.user_id, e);
            UseCaseErrors::StorageError
        })?;

        Ok(reconcile_due_reminders(
            due,
            &active_plantings,
            &recent_watering,
            now,
        ))
    }
}
