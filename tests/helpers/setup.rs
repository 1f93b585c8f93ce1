use chrono::Utc;
use tanam_api::Application;
use tanam_domain::ID;
use tanam_infra::{JwtSessionResolver, TanamContext};
use tanam_sdk::TanamSDK;

pub struct TestApp {
    pub ctx: TanamContext,
    pub address: String,
}

impl TestApp {
    /// Client authenticated as the given user
    pub fn sdk_for(&self, user_id: &ID) -> TanamSDK {
        let now = Utc::now().timestamp() as usize;
        let token = JwtSessionResolver::new(&self.ctx.config.session_secret)
            .issue_token(user_id, now, now + 60 * 60)
            .expect("Expected to issue session token");
        TanamSDK::new(self.address.clone(), token)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TanamSDK) {
    let mut ctx = TanamContext::create_inmemory();
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = TanamSDK::new_anonymous(address.clone());
    (TestApp { ctx, address }, sdk)
}
