//! Handler-level tests running the whole site against in-memory tables.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use inkwell_core::domain::CommentGate;
use inkwell_core::ports::{
    BaseRepository, CommentRepository, PasswordService, PostRepository, SessionService,
    UserRepository,
};
use inkwell_infra::{Argon2PasswordService, SessionConfig, SignedSessionService};
use inkwell_shared::{CommentForm, LoginForm, PostForm, RegisterForm};

use crate::handlers::GATE_COOKIE;
use crate::middleware::auth::SESSION_COOKIE;
use crate::state::AppState;

fn test_session_config() -> SessionConfig {
    SessionConfig {
        secret: "test-secret".to_string(),
        ttl_hours: 1,
        issuer: "test".to_string(),
    }
}

macro_rules! spawn_app {
    ($state:expr) => {{
        let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let session_service: Arc<dyn SessionService> =
            Arc::new(SignedSessionService::new(test_session_config()));
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new(password_service))
                .app_data(web::Data::new(session_service))
                .configure(crate::handlers::configure_routes),
        )
        .await
    }};
}

macro_rules! register {
    ($app:expr, $email:expr, $pw:expr, $name:expr) => {{
        test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/register")
                .set_form(&RegisterForm {
                    email: $email.to_string(),
                    password: $pw.to_string(),
                    name: $name.to_string(),
                })
                .to_request(),
        )
        .await
    }};
}

/// Logs in and returns the session cookie.
macro_rules! login {
    ($app:expr, $email:expr, $pw:expr) => {{
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(&LoginForm {
                    email: $email.to_string(),
                    password: $pw.to_string(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("login should set the session cookie")
            .into_owned()
    }};
}

fn post_form(title: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        subtitle: "A subtitle".to_string(),
        body: "<p>Body</p>".to_string(),
        img_url: "https://example.com/cover.png".to_string(),
    }
}

#[actix_rt::test]
async fn test_registering_twice_with_same_email() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    let first = register!(app, "a@x.com", "pw", "Ann");
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(first.headers().get("location").unwrap(), "/login");

    let second = register!(app, "a@x.com", "pw2", "Ann2");
    assert_eq!(second.status(), StatusCode::OK);
    let body = test::read_body(second).await;
    assert!(String::from_utf8_lossy(&body).contains("The user already exists!"));

    assert_eq!(state.users.count().await.unwrap(), 1);
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);
    register!(app, "a@x.com", "pw", "Ann");

    let wrong_password = test::call_and_read_body(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&LoginForm {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .to_request(),
    )
    .await;

    let unknown_email = test::call_and_read_body(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(&LoginForm {
                email: "nobody@x.com".to_string(),
                password: "pw".to_string(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(wrong_password, unknown_email);
    assert!(String::from_utf8_lossy(&wrong_password).contains("Invalid Credentials!"));
}

#[actix_rt::test]
async fn test_non_admin_can_create_but_not_edit_or_delete() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    // First account is the admin; second is a plain reader.
    register!(app, "admin@x.com", "pw", "Root");
    register!(app, "ann@x.com", "pw", "Ann");
    let ann = login!(app, "ann@x.com", "pw");

    // Creation is deliberately open to any session.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new-post")
            .cookie(ann.clone())
            .set_form(&post_form("T"))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);

    // Edit and delete are not.
    let edit = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/edit-post/1")
            .cookie(ann.clone())
            .set_form(&post_form("T2"))
            .to_request(),
    )
    .await;
    assert_eq!(edit.status(), StatusCode::FORBIDDEN);

    let delete = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/delete/1")
            .cookie(ann)
            .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);

    // The post is untouched.
    let post = state.posts.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(post.title, "T");
}

#[actix_rt::test]
async fn test_admin_can_edit_and_delete() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    register!(app, "admin@x.com", "pw", "Root");
    register!(app, "ann@x.com", "pw", "Ann");
    let ann = login!(app, "ann@x.com", "pw");
    let admin = login!(app, "admin@x.com", "pw");

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new-post")
            .cookie(ann)
            .set_form(&post_form("T"))
            .to_request(),
    )
    .await;
    let original_date = state.posts.find_by_id(1).await.unwrap().unwrap().date;

    let edit = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/edit-post/1")
            .cookie(admin.clone())
            .set_form(&post_form("T2"))
            .to_request(),
    )
    .await;
    assert_eq!(edit.status(), StatusCode::SEE_OTHER);

    // Change visible on read; author reassigned to the editor; date kept.
    let post = state.posts.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(post.title, "T2");
    assert_eq!(post.author_id, 1);
    assert_eq!(post.date, original_date);

    let delete = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/delete/1")
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::SEE_OTHER);

    assert!(state.posts.find_by_id(1).await.unwrap().is_none());
    let gone = test::call_service(&app, test::TestRequest::get().uri("/post/1").to_request()).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_authenticated_comment_is_persisted() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    register!(app, "ann@x.com", "pw", "Ann");
    let ann = login!(app, "ann@x.com", "pw");
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new-post")
            .cookie(ann.clone())
            .set_form(&post_form("T"))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/post/1")
            .cookie(ann)
            .set_form(&CommentForm {
                comment: "first!".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/post/1");

    let comments = state.comments.find_by_post_id(1).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_id, 1);
    assert_eq!(comments[0].text, "first!");
}

#[actix_rt::test]
async fn test_unauthenticated_comment_is_gated() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    register!(app, "ann@x.com", "pw", "Ann");
    let ann = login!(app, "ann@x.com", "pw");
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new-post")
            .cookie(ann)
            .set_form(&post_form("T"))
            .to_request(),
    )
    .await;

    // Logged-out submission: dropped, gated, sent to login.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/post/1")
            .set_form(&CommentForm {
                comment: "drive-by".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/login");
    let gate = resp
        .response()
        .cookies()
        .find(|c| c.name() == GATE_COOKIE)
        .expect("gate cookie should be set")
        .into_owned();
    assert!(state.comments.find_by_post_id(1).await.unwrap().is_empty());

    // The next login render consumes the gate: message shown once, cookie
    // cleared.
    let login_page = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/login")
            .cookie(gate)
            .to_request(),
    )
    .await;
    let cleared = login_page
        .response()
        .cookies()
        .find(|c| c.name() == GATE_COOKIE)
        .map(|c| c.into_owned());
    assert!(cleared.is_some_and(|c| c.value().is_empty()));
    let body = test::read_body(login_page).await;
    assert!(String::from_utf8_lossy(&body).contains(CommentGate::MESSAGE));

    // Without the cookie the gate is open again.
    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get().uri("/login").to_request(),
    )
    .await;
    assert!(!String::from_utf8_lossy(&body).contains(CommentGate::MESSAGE));
}

#[actix_rt::test]
async fn test_missing_post_renders_404() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/post/99").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_new_post_requires_a_session() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/new-post").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/login");
}

#[actix_rt::test]
async fn test_duplicate_title_re_renders_the_form() {
    let state = AppState::in_memory();
    let app = spawn_app!(state);

    register!(app, "ann@x.com", "pw", "Ann");
    let ann = login!(app, "ann@x.com", "pw");

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new-post")
            .cookie(ann.clone())
            .set_form(&post_form("Same Title"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let duplicate = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new-post")
            .cookie(ann)
            .set_form(&post_form("Same Title"))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::OK);
    let body = test::read_body(duplicate).await;
    assert!(String::from_utf8_lossy(&body).contains("A post with that title already exists!"));

    assert_eq!(state.posts.list_all().await.unwrap().len(), 1);
}
