//! HTTP-level integration tests for the curriculum taxonomy resources:
//! programs, learning lines, components, tracks, and courses.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth, seed_user,
    seed_user_with_programs, token_for,
};
use sqlx::PgPool;

use curricula_db::models::course::CreateCourse;
use curricula_db::models::learning_line::CreateLearningLine;
use curricula_db::models::program::CreateProgram;
use curricula_db::repositories::{CourseRepo, LearningLineRepo, ProgramRepo};

async fn seed_program(pool: &PgPool, name: &str) -> i64 {
    ProgramRepo::create(
        pool,
        &CreateProgram {
            name: name.to_string(),
        },
    )
    .await
    .expect("program creation should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// Listing programs without a token returns 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_programs_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = get(app, "/api/v1/programs").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// ADMIN can create a program; the list embeds courses and learning lines.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_create_and_list_with_relations(pool: PgPool) {
    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "Applied Informatics" });
    let response = post_json_auth(app, "/api/v1/programs", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let program_id = created["data"]["id"].as_i64().unwrap();

    CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Web Fundamentals".to_string(),
            program_id,
        },
    )
    .await
    .expect("course creation should succeed");
    LearningLineRepo::create_with_programs(
        &pool,
        &CreateLearningLine {
            title: "Programming".to_string(),
        },
        &[program_id],
    )
    .await
    .expect("learning line creation should succeed");

    let app = common::build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/programs", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let programs = json["data"].as_array().unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["name"], "Applied Informatics");
    assert_eq!(programs[0]["courses"][0]["name"], "Web Fundamentals");
    assert_eq!(programs[0]["learning_lines"][0]["title"], "Programming");
}

/// A STUDENT cannot create a program (403).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_create_forbidden_for_student(pool: PgPool) {
    let student = seed_user(&pool, "student@test.com", "STUDENT").await;
    let token = token_for(&student);
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "name": "Nope" });
    let response = post_json_auth(app, "/api/v1/programs", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// `?assigned=true` scopes a DOCENT to their assigned programs only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_list_assigned_scoping(pool: PgPool) {
    let mine = seed_program(&pool, "Mine").await;
    let _other = seed_program(&pool, "Other").await;
    let docent = seed_user_with_programs(&pool, "docent@test.com", "DOCENT", &[mine]).await;
    let token = token_for(&docent);

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/programs?assigned=true", &token).await;
    let json = body_json(response).await;
    let programs = json["data"].as_array().unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["name"], "Mine");

    // Without the flag the docent sees everything.
    let app = common::build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/programs", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

/// Program detail returns learning lines with their components; missing id is 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_detail_and_missing(pool: PgPool) {
    let program_id = seed_program(&pool, "Detail").await;
    LearningLineRepo::create_with_programs(
        &pool,
        &CreateLearningLine {
            title: "Networks".to_string(),
        },
        &[program_id],
    )
    .await
    .expect("learning line creation should succeed");

    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, &format!("/api/v1/programs/{program_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Detail");
    assert_eq!(json["data"]["learning_lines"][0]["title"], "Networks");

    let app = common::build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/programs/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Update and delete round out the program lifecycle.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_update_and_delete(pool: PgPool) {
    let program_id = seed_program(&pool, "Before").await;
    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "After" });
    let response =
        put_json_auth(app, &format!("/api/v1/programs/{program_id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "After");

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/programs/{program_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/v1/programs/{program_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting a program cascades to its courses.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_delete_cascades_to_courses(pool: PgPool) {
    let program_id = seed_program(&pool, "Doomed").await;
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Orphan".to_string(),
            program_id,
        },
    )
    .await
    .expect("course creation should succeed");

    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/programs/{program_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let gone = CourseRepo::find_by_id(&pool, course.id)
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none(), "course must be deleted with its program");
}

// ---------------------------------------------------------------------------
// Learning lines
// ---------------------------------------------------------------------------

/// Create with program links, filter by program, replace links on update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_learning_line_lifecycle(pool: PgPool) {
    let program_a = seed_program(&pool, "Alpha").await;
    let program_b = seed_program(&pool, "Beta").await;
    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "title": "Databases", "program_ids": [program_a] });
    let response = post_json_auth(app, "/api/v1/learning-lines", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let line_id = created["data"]["id"].as_i64().unwrap();

    // Filtered list only matches the linked program.
    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/learning-lines?program_id={program_b}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/learning-lines?program_id={program_a}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Update replaces the program links wholesale.
    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "program_ids": [program_b] });
    let response = put_json_auth(
        app,
        &format!("/api/v1/learning-lines/{line_id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/learning-lines?program_id={program_a}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(
        json["data"].as_array().unwrap().is_empty(),
        "old program link must be gone"
    );

    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, &format!("/api/v1/learning-lines/{line_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Components are created under a line, listed in sort order with the parent
/// line embedded, and filterable by line.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_component_lifecycle(pool: PgPool) {
    let line = LearningLineRepo::create_with_programs(
        &pool,
        &CreateLearningLine {
            title: "Security".to_string(),
        },
        &[],
    )
    .await
    .expect("learning line creation should succeed");

    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "name": "Cryptography", "learning_line_id": line.id, "sort_order": 2
    });
    let response = post_json_auth(app, "/api/v1/components", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({
        "name": "Threat Modeling", "learning_line_id": line.id, "sort_order": 1
    });
    let response = post_json_auth(app, "/api/v1/components", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let component_id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/components?learning_line_id={}", line.id),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let components = json["data"].as_array().unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0]["name"], "Threat Modeling", "sorted by sort_order");
    assert_eq!(components[0]["learning_line"]["title"], "Security");

    // Missing learning_line_id on create is a 400.
    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "No Line" });
    let response = post_json_auth(app, "/api/v1/components", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, &format!("/api/v1/components/{component_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

/// Tracks link to programs like learning lines do.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_track_lifecycle(pool: PgPool) {
    let program = seed_program(&pool, "Gamma").await;
    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let token = token_for(&admin);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "Fast Track", "program_ids": [program] });
    let response = post_json_auth(app, "/api/v1/tracks", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let track_id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/tracks", &token).await;
    let json = body_json(response).await;
    let tracks = json["data"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["programs"][0]["name"], "Gamma");

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "Slow Track", "program_ids": [] });
    let response = put_json_auth(app, &format!("/api/v1/tracks/{track_id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Slow Track");

    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, &format!("/api/v1/tracks/{track_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// A DOCENT may create and update courses, but only ADMIN may delete them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_role_split(pool: PgPool) {
    let program = seed_program(&pool, "Delta").await;
    let docent = seed_user(&pool, "docent@test.com", "DOCENT").await;
    let docent_token = token_for(&docent);

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "Algorithms", "program_id": program });
    let response = post_json_auth(app, "/api/v1/courses", body, &docent_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let course_id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "name": "Algorithms II" });
    let response = put_json_auth(
        app,
        &format!("/api/v1/courses/{course_id}"),
        body,
        &docent_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // DOCENT delete is forbidden.
    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/courses/{course_id}"), &docent_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = seed_user(&pool, "admin@test.com", "ADMIN").await;
    let admin_token = token_for(&admin);
    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, &format!("/api/v1/courses/{course_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Course list filters by program and embeds the parent program.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_list_filter(pool: PgPool) {
    let program_a = seed_program(&pool, "Epsilon").await;
    let program_b = seed_program(&pool, "Zeta").await;
    for (name, pid) in [("A1", program_a), ("A2", program_a), ("B1", program_b)] {
        CourseRepo::create(
            &pool,
            &CreateCourse {
                name: name.to_string(),
                program_id: pid,
            },
        )
        .await
        .expect("course creation should succeed");
    }

    let student = seed_user(&pool, "student@test.com", "STUDENT").await;
    let token = token_for(&student);

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/courses?program_id={program_a}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let courses = json["data"].as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0]["program"]["name"], "Epsilon");
}
