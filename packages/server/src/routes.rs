use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Every endpoint, mounted under `/api` by [`crate::build_router`].
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1_routes())
}

fn v1_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/classes", class_routes())
        .nest("/activities", activity_routes())
        .nest("/templates", template_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn class_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::classroom::list_classrooms,
            handlers::classroom::create_classroom
        ))
        .routes(routes!(handlers::classroom::get_classroom))
        .routes(routes!(
            handlers::classroom::list_teams,
            handlers::classroom::create_team
        ))
        .routes(routes!(handlers::activity::list_class_activities))
        .routes(routes!(handlers::activity::create_activity_from_template))
        .routes(routes!(handlers::team_activity::list_team_activities))
        .routes(routes!(handlers::team_activity::list_submitted_activities))
}

fn activity_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::activity::create_activity))
        .routes(routes!(
            handlers::activity::get_activity,
            handlers::activity::update_activity,
            handlers::activity::delete_activity
        ))
        .routes(routes!(
            handlers::activity::add_evaluation,
            handlers::activity::delete_evaluation
        ))
}

fn template_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::template::list_templates,
            handlers::template::create_template
        ))
        .routes(routes!(handlers::template::get_template))
}
