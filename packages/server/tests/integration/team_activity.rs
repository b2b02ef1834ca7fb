use serde_json::json;

use crate::common::{TestApp, routes};

mod all_activities {
    use super::*;

    #[tokio::test]
    async fn lists_activities_assigned_to_the_team_within_the_class() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let red = app.create_team(&token, class_id, "Red").await;
        let blue = app.create_team(&token, class_id, "Blue").await;

        let shared = app
            .create_activity(&token, class_id, "Lab 1", &[red, blue])
            .await;
        app.create_activity(&token, class_id, "Lab 2", &[blue]).await;
        let red_only = app.create_activity(&token, class_id, "Lab 3", &[red]).await;

        let res = app
            .get_with_token(&routes::team_activities(class_id, red), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![shared as i64, red_only as i64]);
        assert_eq!(res.body[0]["team_id"], json!([red, blue]));
    }

    #[tokio::test]
    async fn activities_of_other_classes_are_excluded() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let biology = app.create_class(&token, "Biology 101").await;
        let chemistry = app.create_class(&token, "Chemistry").await;
        let red = app.create_team(&token, biology, "Red").await;

        // Cross-class team membership is not enforced on create.
        app.create_activity(&token, chemistry, "Titration", &[red])
            .await;

        let res = app
            .get_with_token(&routes::team_activities(biology, red), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn existing_class_and_team_without_matches_yield_empty_list() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let red = app.create_team(&token, class_id, "Red").await;

        let res = app
            .get_with_token(&routes::team_activities(class_id, red), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn unknown_class_is_reported_before_team() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;

        let res = app
            .get_with_token(&routes::team_activities(9999, 9999), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["error"], "Class not found");
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;

        let res = app
            .get_with_token(&routes::team_activities(class_id, 9999), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Team not found");
    }

    #[tokio::test]
    async fn non_numeric_team_id_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;

        let res = app
            .get_with_token(
                &format!("/api/v1/classes/{class_id}/teams/red/activities"),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn listing_without_a_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::team_activities(1, 1)).await;

        assert_eq!(res.status, 401);
    }
}

mod submitted_activities {
    use super::*;

    #[tokio::test]
    async fn only_submitted_activities_are_listed() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let red = app.create_team(&token, class_id, "Red").await;

        let pending = app.create_activity(&token, class_id, "Lab 1", &[red]).await;
        let submitted = app.create_activity(&token, class_id, "Lab 2", &[red]).await;
        app.submit_activity(&token, submitted).await;

        let res = app
            .get_with_token(&routes::submitted_activities(class_id, red), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![submitted as i64]);
        assert_eq!(res.body[0]["submission_status"], true);

        let all = app
            .get_with_token(&routes::team_activities(class_id, red), &token)
            .await;
        assert_eq!(all.ids(), vec![pending as i64, submitted as i64]);
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;

        let res = app
            .get_with_token(&routes::submitted_activities(class_id, 9999), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Team not found");
    }

    #[tokio::test]
    async fn unknown_class_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let red = app.create_team(&token, class_id, "Red").await;

        let res = app
            .get_with_token(&routes::submitted_activities(9999, red), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["error"], "Class not found");
    }

    #[tokio::test]
    async fn nothing_submitted_yields_empty_list() {
        let app = TestApp::spawn().await;
        let token = app.teacher().await;
        let class_id = app.create_class(&token, "Biology 101").await;
        let red = app.create_team(&token, class_id, "Red").await;
        app.create_activity(&token, class_id, "Lab 1", &[red]).await;

        let res = app
            .get_with_token(&routes::submitted_activities(class_id, red), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}
