mod catalog;

use anyhow::Result;
use chrono::Utc;

use campus_auth::{AuthError, AuthService, SignUpRequest};
use campus_core::{CampusContext, Config};
use campus_recommend::{
    upcoming_events, RecommendationEngine, DEFAULT_UPCOMING_LIMIT,
};
use campus_repository::Repository;

const DEMO_EMAIL: &str = "test.123@iqra.edu.pk";
const DEMO_PASSWORD: &str = "test123";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Campus Connect data core");

    let config = Config::from_env();
    let top_n = config.recommend.top_n;
    let ctx = CampusContext::new(config).await?;

    let repository = Repository::new(ctx.clone());
    let auth = AuthService::new(ctx);
    let engine = RecommendationEngine::new(repository.clone());
    let events = catalog::sample_events();

    // Sign in, creating the demo account on first run.
    let user = match auth.sign_in(DEMO_EMAIL, DEMO_PASSWORD).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            auth.sign_up(SignUpRequest {
                email: DEMO_EMAIL.to_string(),
                password: DEMO_PASSWORD.to_string(),
                full_name: "Test Student".to_string(),
                student_id: Some("TEST123".to_string()),
                department: Some("Computer Science".to_string()),
            })
            .await?
        }
        Err(err) => return Err(err.into()),
    };
    tracing::info!(user = %user.id, email = %user.email, "session ready");

    // Register for the first event the user hasn't joined yet, following the
    // two-step protocol: persist the registration, then fold its category
    // into the preference history.
    for event in &events {
        if repository.is_registered(&event.id, &user.id).await {
            continue;
        }
        let registration = repository.save_registration(&event.id, &user).await?;
        repository
            .update_preferences_from_registration(event.category)
            .await?;
        tracing::info!(
            event = %event.name,
            qr_code = %registration.qr_code,
            "registered"
        );
        break;
    }

    for event in engine.recommend(&events, top_n).await {
        tracing::info!(
            event = %event.name,
            category = %event.category,
            registrations = event.registration_count,
            "recommended"
        );
    }

    for event in upcoming_events(&events, Utc::now(), DEFAULT_UPCOMING_LIMIT) {
        tracing::info!(event = %event.name, time = %event.time, "upcoming");
    }

    Ok(())
}
