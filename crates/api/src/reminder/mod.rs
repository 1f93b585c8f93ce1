mod complete_reminder;
mod create_reminder;
mod get_upcoming_reminders;

use actix_web::web;
use complete_reminder::complete_reminder_controller;
use create_reminder::create_reminder_controller;
use get_upcoming_reminders::get_upcoming_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminders/upcoming",
        web::get().to(get_upcoming_reminders_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/complete",
        web::post().to(complete_reminder_controller),
    );
}

#[cfg(test)]
pub(crate) mod test_utils {
    use tanam_infra::ISys;

    pub struct StaticTimeSys(pub i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    pub const START_TS: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100
    pub const HOUR_MILLIS: i64 = 1000 * 60 * 60;
}
