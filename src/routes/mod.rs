use crate::config::rate_limit::{RateLimitConfig, RateLimitRule};
use crate::handlers;
use crate::middleware::auth::auth_middleware;
use axum::{middleware, routing, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

pub fn create_routes() -> Router {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    let auth = auth_routes(&rate_limit_config);
    let public_read = public_read_routes(&rate_limit_config);
    let protected =
        protected_routes(&rate_limit_config).layer(middleware::from_fn(auth_middleware));

    auth.merge(public_read).merge(protected)
}

/// Auth routes: registration, login and the password-reset pair.
fn auth_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route("/auth/register", routing::post(handlers::register))
        .route("/auth/login", routing::post(handlers::login))
        .route(
            "/auth/forgotpassword",
            routing::post(handlers::auth::forgot_password),
        )
        .route(
            "/auth/resetpassword/{resettoken}",
            routing::put(handlers::auth::reset_password),
        );

    with_optional_rate_limit(router, config.enabled, config.auth)
}

/// Public catalog reads plus the contact form.
fn public_read_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Classes
        .route("/classes", routing::get(handlers::gym_class::list_classes))
        .route("/classes/{id}", routing::get(handlers::gym_class::get_class))
        // Trainers
        .route("/trainers", routing::get(handlers::trainer::list_trainers))
        .route("/trainers/{id}", routing::get(handlers::trainer::get_trainer))
        // Membership plans
        .route(
            "/memberships",
            routing::get(handlers::membership::list_memberships),
        )
        .route(
            "/memberships/{id}",
            routing::get(handlers::membership::get_membership),
        )
        // Contact form
        .route("/contact", routing::post(handlers::contact::submit_contact));

    with_optional_rate_limit(router, config.enabled, config.public_read)
}

/// Authenticated routes. Admin-only routes check the role in the handler.
fn protected_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Auth
        .route("/auth/me", routing::get(handlers::get_current_user))
        .route("/auth/logout", routing::get(handlers::auth::logout))
        // Self-service
        .route("/users/profile", routing::put(handlers::user::update_profile))
        .route(
            "/users/enroll/{class_id}",
            routing::put(handlers::user::enroll_in_class),
        )
        .route("/users/me/classes", routing::get(handlers::user::my_classes))
        // User administration
        .route(
            "/users",
            routing::get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            routing::get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        // Catalog administration
        .route(
            "/classes",
            routing::post(handlers::gym_class::create_class),
        )
        .route(
            "/classes/{id}",
            routing::put(handlers::gym_class::update_class)
                .delete(handlers::gym_class::delete_class),
        )
        .route(
            "/classes/{id}/routine",
            routing::put(handlers::gym_class::update_routine),
        )
        .route(
            "/trainers",
            routing::post(handlers::trainer::create_trainer),
        )
        .route(
            "/trainers/{id}",
            routing::put(handlers::trainer::update_trainer)
                .delete(handlers::trainer::delete_trainer),
        )
        .route(
            "/trainers/{id}/schedule",
            routing::put(handlers::trainer::update_schedule),
        )
        .route(
            "/memberships",
            routing::post(handlers::membership::create_membership),
        )
        .route(
            "/memberships/{id}",
            routing::put(handlers::membership::update_membership)
                .delete(handlers::membership::delete_membership),
        )
        // Contact inbox
        .route("/contact", routing::get(handlers::contact::list_contacts))
        // Stubs kept for client compatibility
        .route(
            "/payments",
            routing::get(handlers::payment::list_payments)
                .post(handlers::payment::create_payment),
        )
        .route(
            "/feedback",
            routing::get(handlers::feedback::list_feedback)
                .post(handlers::feedback::submit_feedback),
        );

    with_optional_rate_limit(router, config.enabled, config.protected)
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
        .expect("Invalid rate limit configuration");

    router.layer(GovernorLayer::new(governor_conf))
}
