use crate::{
    error::TanamError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use tanam_api_structs::create_reminder::{APIResponse, RequestBody};
use tanam_domain::{Reminder, ReminderType, ID};
use tanam_infra::TanamContext;

fn handle_error(e: UseCaseErrors) -> TanamError {
    match e {
        UseCaseErrors::EmptyMessage => {
            TanamError::BadClientData("The reminder message can not be empty.".into())
        }
        UseCaseErrors::PlantingNotFound(planting_id) => TanamError::NotFound(format!(
            "The planting history with id: {}, was not found.",
            planting_id
        )),
        UseCaseErrors::StorageError => TanamError::InternalError,
    }
}

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TanamContext>,
) -> Result<HttpResponse, TanamError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let body = body.into_inner();
    let usecase = CreateReminderUseCase {
        user_id,
        reminder_type: body.reminder_type,
        message: body.message,
        scheduled_date: body.scheduled_date,
        planting_history_id: body.planting_history_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub reminder_type: ReminderType,
    pub message: String,
    pub scheduled_date: DateTime<Utc>,
    /// Must reference a planting of the same user
    pub planting_history_id: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    EmptyMessage,
    PlantingNotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TanamContext) -> Result<Self::Response, Self::Errors> {
        if self.message.trim().is_empty() {
            return Err(UseCaseErrors::EmptyMessage);
        }

        if let Some(planting_id) = &self.planting_history_id {
            let planting = ctx
                .repos
                .planting_histories
                .find_by_user(planting_id, &self.user_id)
                .await
                .map_err(|_| UseCaseErrors::StorageError)?;
            if planting.is_none() {
                return Err(UseCaseErrors::PlantingNotFound(planting_id.clone()));
            }
        }

        let mut reminder = Reminder::new(
            self.user_id.clone(),
            self.reminder_type,
            self.message.trim(),
            self.scheduled_date,
            ctx.sys.now(),
        );
        reminder.planting_history_id = self.planting_history_id.clone();

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(reminder)
    }
}
