use moodlog::{app, logging, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("moodlog=debug,axum=info,tower_http=info");

    let app_state = AppState::init().await?;
    let router = app::build_app(app_state.clone());
    app::serve(router, app_state).await
}
