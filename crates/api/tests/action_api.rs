//! HTTP-level tests for action CRUD, the action plan and the summary.

mod common;

use axum::http::StatusCode;
use common::{
    admin_session, body_json, delete_with_cookie, get, get_with_cookie, post_json_with_cookie,
    put_json_with_cookie,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use vitals_db::models::question::CreateQuestion;
use vitals_db::models::respondent::CreateRespondent;
use vitals_db::models::response::CreateSurveyResponse;
use vitals_db::models::survey::CreateSurvey;
use vitals_db::repositories::{QuestionRepo, RespondentRepo, ResponseRepo, SurveyRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_survey(pool: &PgPool) -> uuid::Uuid {
    SurveyRepo::create(
        pool,
        &CreateSurvey {
            organization_id: None,
            title: "Ward survey".into(),
            description: None,
            minimum_threshold: Some(3.0),
        },
    )
    .await
    .unwrap()
    .id
}

async fn create(pool: &PgPool, survey_id: uuid::Uuid, body: Value) -> Value {
    let cookie = admin_session(pool).await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/actions"),
        &cookie,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn action_body(dimension: &str, tier: &str, title: &str, priority: &str) -> Value {
    json!({ "dimension": dimension, "tier": tier, "title": title, "priority": priority })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn action_routes_require_session(pool: PgPool) {
    let survey_id = seed_survey(&pool).await;
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/surveys/{survey_id}/actions")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_list_round_trips(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let created = create(
        &pool,
        survey_id,
        json!({
            "dimension": "Communication",
            "tier": "critical",
            "title": "Weekly briefings",
            "description": "Ten minutes every Monday",
            "priority": "high",
            "assignee": "Ward manager",
            "target_date": "2026-11-30",
            "evidence_urls": ["https://intranet.example.com/briefings"]
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response =
        get_with_cookie(app, &format!("/api/surveys/{survey_id}/actions"), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await["data"].clone();

    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0]["target_date"], "2026-11-30");
    assert_eq!(listed[0]["is_completed"], false);
    assert_eq!(listed[0]["comments"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_strong_tier(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/actions"),
        &cookie,
        action_body("Workload", "strong", "Nothing to do", "low"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_missing_title(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/actions"),
        &cookie,
        json!({ "dimension": "Workload", "tier": "critical" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_unknown_survey_returns_404(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json_with_cookie(
        app,
        &format!("/api/surveys/{}/actions", uuid::Uuid::new_v4()),
        &cookie,
        action_body("Workload", "critical", "Rota", "low"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_to_done_completes_and_back_reopens(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let created = create(
        &pool,
        survey_id,
        action_body("Workload", "critical", "Rota", "medium"),
    )
    .await;
    let uri = format!("/api/actions/{}", created["id"].as_str().unwrap());

    let app = common::build_test_app(pool.clone());
    let response =
        put_json_with_cookie(app, &uri, &cookie, json!({ "workflow_stage": "done" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let done = body_json(response).await["data"].clone();
    assert_eq!(done["workflow_stage"], "done");
    assert_eq!(done["is_completed"], true);

    let app = common::build_test_app(pool.clone());
    let response =
        put_json_with_cookie(app, &uri, &cookie, json!({ "workflow_stage": "review" })).await;
    let review = body_json(response).await["data"].clone();
    assert_eq!(review["is_completed"], false);

    let app = common::build_test_app(pool);
    let response =
        put_json_with_cookie(app, &uri, &cookie, json!({ "is_completed": true })).await;
    let completed = body_json(response).await["data"].clone();
    assert_eq!(completed["workflow_stage"], "done");
    assert_eq!(completed["is_completed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_nulls_clear_optional_fields(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let created = create(
        &pool,
        survey_id,
        json!({
            "dimension": "Workload",
            "tier": "critical",
            "title": "Rota",
            "description": "d",
            "assignee": "Dana",
            "target_date": "2026-12-01"
        }),
    )
    .await;
    let uri = format!("/api/actions/{}", created["id"].as_str().unwrap());

    let app = common::build_test_app(pool);
    let response = put_json_with_cookie(
        app,
        &uri,
        &cookie,
        json!({ "assignee": null, "target_date": null, "description": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();

    assert_eq!(updated["assignee"], Value::Null);
    assert_eq!(updated["target_date"], Value::Null);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["title"], "Rota");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_unknown_action_returns_404(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let app = common::build_test_app(pool);
    let response = put_json_with_cookie(
        app,
        &format!("/api/actions/{}", uuid::Uuid::new_v4()),
        &cookie,
        json!({ "title": "Renamed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_is_idempotent(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let created = create(&pool, survey_id, action_body("Workload", "critical", "Rota", "low")).await;
    let uri = format!("/api/actions/{}", created["id"].as_str().unwrap());

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = delete_with_cookie(app, &uri, &cookie).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let app = common::build_test_app(pool);
    let response = get_with_cookie(app, &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comments_prepend_and_evidence_appends(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let created = create(&pool, survey_id, action_body("Workload", "at_risk", "Rota", "low")).await;
    let id = created["id"].as_str().unwrap().to_string();

    for content in ["first", "second"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_with_cookie(
            app,
            &format!("/api/actions/{id}/comments"),
            &cookie,
            json!({ "content": content, "author_name": "Sam" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone());
    let response = post_json_with_cookie(
        app,
        &format!("/api/actions/{id}/evidence"),
        &cookie,
        json!({ "url": "https://files.example.com/rota.pdf" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let action = body_json(response).await["data"].clone();

    assert_eq!(action["comments"][0]["content"], "second");
    assert_eq!(action["comments"][1]["content"], "first");
    assert_eq!(action["comments"][0]["author_name"], "Sam");
    assert_eq!(action["evidence_urls"], json!(["https://files.example.com/rota.pdf"]));

    let app = common::build_test_app(pool);
    let response = post_json_with_cookie(
        app,
        &format!("/api/actions/{id}/evidence"),
        &cookie,
        json!({ "url": "javascript:alert(1)" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_comment_is_rejected(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let created = create(&pool, survey_id, action_body("Workload", "at_risk", "Rota", "low")).await;
    let app = common::build_test_app(pool);
    let response = post_json_with_cookie(
        app,
        &format!("/api/actions/{}/comments", created["id"].as_str().unwrap()),
        &cookie,
        json!({ "content": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn action_plan_orders_active_by_priority(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    create(&pool, survey_id, action_body("Workload", "critical", "Low one", "low")).await;
    create(&pool, survey_id, action_body("Workload", "critical", "High one", "high")).await;
    create(
        &pool,
        survey_id,
        json!({
            "dimension": "Workload",
            "tier": "critical",
            "title": "Finished",
            "workflow_stage": "done"
        }),
    )
    .await;
    create(&pool, survey_id, action_body("Workload", "critical", "Medium one", "medium")).await;

    let app = common::build_test_app(pool);
    let response = get_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/action-plan"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let plan = body_json(response).await["data"].clone();

    let titles: Vec<&str> = plan["active"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["High one", "Medium one", "Low one"]);
    assert_eq!(plan["completed"].as_array().unwrap().len(), 1);
    assert_eq!(plan["completed"][0]["title"], "Finished");
}

/// Four respondents answer two questions. Communication averages 2.5 (50%,
/// critical against a 60% threshold); Workload averages 4.5 (90%, strong).
async fn seed_responses(pool: &PgPool, survey_id: uuid::Uuid) {
    let mut questions = Vec::new();
    for dimension in ["Communication", "Workload"] {
        let q = QuestionRepo::create(
            pool,
            &CreateQuestion {
                survey_id,
                dimension: dimension.into(),
                text: format!("{dimension} question"),
                sort_order: None,
            },
        )
        .await
        .unwrap();
        questions.push(q.id);
    }

    for (comms, load) in [(2, 4), (3, 5), (2, 5), (3, 4)] {
        let respondent = RespondentRepo::create(
            pool,
            &CreateRespondent {
                survey_id,
                organization_id: None,
                user_id: None,
                completed_at: None,
            },
        )
        .await
        .unwrap();
        for (question_id, score) in [(questions[0], comms), (questions[1], load)] {
            ResponseRepo::create(
                pool,
                &CreateSurveyResponse {
                    respondent_id: respondent.id,
                    question_id,
                    organization_id: None,
                    score,
                },
            )
            .await
            .unwrap();
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_classifies_and_cross_references(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    seed_responses(&pool, survey_id).await;
    create(&pool, survey_id, action_body("Communication", "critical", "Briefings", "high")).await;
    create(&pool, survey_id, action_body("Communication", "at_risk", "Other tier", "low")).await;

    let app = common::build_test_app(pool);
    let response = get_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/summary"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();

    assert_eq!(summary["respondent_count"], 4);
    assert_eq!(summary["average_score"], 3.5);
    assert_eq!(summary["threshold_percentage"], 60.0);

    assert_eq!(summary["critical"].as_array().unwrap().len(), 1);
    let critical = &summary["critical"][0];
    assert_eq!(critical["name"], "Communication");
    assert_eq!(critical["percentage"], 50.0);
    assert_eq!(critical["action_count"], 1);
    assert_eq!(critical["actions"][0]["title"], "Briefings");

    assert_eq!(summary["at_risk"], json!([]));
    assert_eq!(summary["strong"][0]["name"], "Workload");
    assert_eq!(summary["strong"][0]["action_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_threshold_override_is_validated(pool: PgPool) {
    let cookie = admin_session(&pool).await;
    let survey_id = seed_survey(&pool).await;
    let app = common::build_test_app(pool.clone());
    let response = get_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/summary?threshold=7"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    seed_responses(&pool, survey_id).await;
    let app = common::build_test_app(pool);
    let response = get_with_cookie(
        app,
        &format!("/api/surveys/{survey_id}/summary?threshold=2"),
        &cookie,
    )
    .await;
    let summary = body_json(response).await["data"].clone();
    // 50% sits in (40%, 50%], so Communication becomes at-risk.
    assert_eq!(summary["critical"], json!([]));
    assert_eq!(summary["at_risk"][0]["name"], "Communication");
}
