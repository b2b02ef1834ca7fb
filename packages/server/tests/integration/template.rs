use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use classroom_server::entity::activity;

use crate::common::{TestApp, routes};

fn lab_template() -> Value {
    json!({
        "title": "Microscope basics",
        "description": "Identify cell structures.",
        "instructions": "Use the 40x objective.",
        "due_date": "2026-10-30T09:00:00Z",
        "evaluation": 70,
        "total_score": 80,
    })
}

mod templates {
    use super::*;

    #[tokio::test]
    async fn template_can_be_created_and_fetched() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;

        let id = app.create_template(&token, &lab_template()).await;
        let res = app.get_with_token(&routes::template(id), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Microscope basics");
        assert_eq!(res.body["total_score"], 80);
        assert_eq!(res.body["evaluation"], 70);
    }

    #[tokio::test]
    async fn templates_are_listed_in_id_order() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;

        let first = app.create_template(&token, &lab_template()).await;
        let second = app
            .create_template(&token, &json!({"title": "Field trip"}))
            .await;

        let res = app.get_with_token(routes::TEMPLATES, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![first as i64, second as i64]);
        assert_eq!(res.body[1]["total_score"], 100);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;

        let res = app
            .post_with_token(routes::TEMPLATES, &json!({"title": "   "}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_template_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;

        let res = app.get_with_token(&routes::template(9999), &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Template not found");
    }
}

mod from_template {
    use super::*;

    #[tokio::test]
    async fn copies_template_fields_into_the_class() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let red = app.create_team(&token, class_id, "Red").await;
        let template_id = app.create_template(&token, &lab_template()).await;

        let res = app
            .post_with_token(
                &routes::from_template(class_id),
                &json!({"template_id": template_id, "team_ids": [red]}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["success"], "Activity created from template");
        assert_eq!(res.body["template"]["id"], template_id);

        let created = &res.body["activity"];
        assert_eq!(created["title"], "Microscope basics");
        assert_eq!(created["description"], "Identify cell structures.");
        assert_eq!(created["instructions"], "Use the 40x objective.");
        assert_eq!(created["classroom_id"], class_id);
        assert_eq!(created["team_id"], json!([red]));
        assert_eq!(created["evaluation"], 70);
        assert_eq!(created["total_score"], 80);
        assert_eq!(created["submission_status"], false);

        let listed = app
            .get_with_token(&routes::class_activities(class_id), &token)
            .await;
        assert_eq!(listed.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn request_values_override_the_template() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let template_id = app.create_template(&token, &lab_template()).await;

        let res = app
            .post_with_token(
                &routes::from_template(class_id),
                &json!({
                    "template_id": template_id,
                    "due_date": "2026-12-24T18:00:00Z",
                    "evaluation": 0,
                    "total_score": 20,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let created = &res.body["activity"];
        assert_eq!(created["evaluation"], 0);
        assert_eq!(created["total_score"], 20);
        assert!(created["due_date"].as_str().unwrap().starts_with("2026-12-24T18:00:00"));
        assert_eq!(created["team_id"], json!([]));
        assert_eq!(res.body["template"]["total_score"], 80);
    }

    #[tokio::test]
    async fn overriding_total_below_template_evaluation_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let template_id = app.create_template(&token, &lab_template()).await;

        let res = app
            .post_with_token(
                &routes::from_template(class_id),
                &json!({"template_id": template_id, "total_score": 50}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_template_id_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;

        let res = app
            .post_with_token(&routes::from_template(class_id), &json!({}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Template ID or Class ID not provided");
    }

    #[tokio::test]
    async fn non_numeric_class_id_reads_as_missing() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let template_id = app.create_template(&token, &lab_template()).await;

        let res = app
            .post_with_token(
                "/api/v1/classes/abc/activities/from_template",
                &json!({"template_id": template_id}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["error"], "Template ID or Class ID not provided");
    }

    #[tokio::test]
    async fn unknown_template_or_class_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let template_id = app.create_template(&token, &lab_template()).await;

        let res = app
            .post_with_token(
                &routes::from_template(class_id),
                &json!({"template_id": 9999}),
                &token,
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Template not found");

        let res = app
            .post_with_token(
                &routes::from_template(9999),
                &json!({"template_id": template_id}),
                &token,
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Class not found");
    }

    #[tokio::test]
    async fn unknown_team_persists_nothing() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let template_id = app.create_template(&token, &lab_template()).await;

        let res = app
            .post_with_token(
                &routes::from_template(class_id),
                &json!({"template_id": template_id, "team_ids": [9999]}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
        let count = activity::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 0);
    }
}
