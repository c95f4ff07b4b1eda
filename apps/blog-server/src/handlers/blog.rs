//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::{Comment, Post};
use inkwell_core::error::{DomainError, RepoError};
use inkwell_core::ports::{BaseRepository, CommentRepository, PostRepository};
use inkwell_shared::{CommentForm, PostForm};

use crate::middleware::auth::{AdminIdentity, Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

use super::{blocked_gate_cookie, html, see_other};

const DUPLICATE_TITLE_ERROR: &str = "A post with that title already exists!";

async fn post_or_404(state: &AppState, id: i32) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "post",
            id,
        })
        .map_err(AppError::from)
}

async fn author_name(state: &AppState, author_id: i32) -> AppResult<String> {
    Ok(state
        .users
        .find_by_id(author_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| "Unknown".to_string()))
}

/// GET / - list all posts.
pub async fn index(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;

    let mut listed = Vec::with_capacity(posts.len());
    for post in posts {
        let author = author_name(&state, post.author_id).await?;
        listed.push((post, author));
    }

    Ok(html(views::index(identity.0.as_ref(), &listed)))
}

/// GET /post/{id} - show one post with its comments.
pub async fn show_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = post_or_404(&state, post_id).await?;
    let author = author_name(&state, post.author_id).await?;

    let comments = state.comments.find_by_post_id(post_id).await?;
    let mut listed = Vec::with_capacity(comments.len());
    for comment in comments {
        let name = author_name(&state, comment.author_id).await?;
        listed.push((comment, name));
    }

    Ok(html(views::post_page(
        identity.0.as_ref(),
        &post,
        &author,
        &listed,
    )))
}

/// POST /post/{id} - submit a comment.
///
/// Authenticated: the comment is persisted and the visitor returns to the
/// post. Unauthenticated: nothing is persisted; the gate moves to
/// `BlockedPendingLogin` (flash cookie on the redirect) and the visitor
/// lands on the login page.
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i32>,
    body: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = post_or_404(&state, post_id).await?;

    let Some(user) = identity.0 else {
        return Ok(HttpResponse::SeeOther()
            .insert_header((actix_web::http::header::LOCATION, "/login"))
            .cookie(blocked_gate_cookie())
            .finish());
    };

    let comment = Comment::new(user.user_id, post.id, body.into_inner().comment);
    state.comments.save(comment).await?;

    Ok(see_other(&format!("/post/{}", post_id)))
}

/// GET /new-post - blank post form. Any session may author; this route is
/// deliberately not admin-guarded.
pub async fn new_post_form(identity: Identity) -> HttpResponse {
    html(views::post_form_page(
        Some(&identity),
        "New Post",
        "/new-post",
        None,
        None,
    ))
}

/// POST /new-post - create a post authored by the current identity.
pub async fn new_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    let post = Post::new(
        identity.user_id,
        form.title.clone(),
        form.subtitle.clone(),
        form.body.clone(),
        form.img_url.clone(),
    );

    match state.posts.save(post).await {
        Ok(saved) => {
            tracing::info!(post_id = saved.id, author_id = identity.user_id, "Post created");
            Ok(see_other("/"))
        }
        Err(RepoError::Constraint(_)) => Ok(html(views::post_form_page(
            Some(&identity),
            "New Post",
            "/new-post",
            Some(&form),
            Some(DUPLICATE_TITLE_ERROR),
        ))),
        Err(e) => Err(e.into()),
    }
}

/// GET /edit-post/{id} - admin only; form pre-filled from the post.
pub async fn edit_post_form(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = post_or_404(&state, path.into_inner()).await?;

    let values = PostForm {
        title: post.title.clone(),
        subtitle: post.subtitle.clone(),
        body: post.body.clone(),
        img_url: post.img_url.clone(),
    };

    Ok(html(views::post_form_page(
        Some(&admin.0),
        "Edit Post",
        &format!("/edit-post/{}", post.id),
        Some(&values),
        None,
    )))
}

/// POST /edit-post/{id} - admin only; mutates in place. The publication
/// date stays as created; authorship moves to the editor.
pub async fn edit_post(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    path: web::Path<i32>,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = post_or_404(&state, post_id).await?;
    let form = body.into_inner();

    post.apply_edit(
        admin.0.user_id,
        form.title.clone(),
        form.subtitle.clone(),
        form.body.clone(),
        form.img_url.clone(),
    );

    match state.posts.save(post).await {
        Ok(_) => {
            tracing::info!(post_id, editor_id = admin.0.user_id, "Post edited");
            Ok(see_other(&format!("/post/{}", post_id)))
        }
        Err(RepoError::Constraint(_)) => Ok(html(views::post_form_page(
            Some(&admin.0),
            "Edit Post",
            &format!("/edit-post/{}", post_id),
            Some(&form),
            Some(DUPLICATE_TITLE_ERROR),
        ))),
        Err(e) => Err(e.into()),
    }
}

/// GET /delete/{id} - admin only; comments go with the post.
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    match state.posts.delete(post_id).await {
        Ok(()) => {
            tracing::info!(post_id, admin_id = admin.0.user_id, "Post deleted");
            Ok(see_other("/"))
        }
        Err(RepoError::NotFound) => {
            Err(AppError::NotFound(format!("post {} not found", post_id)))
        }
        Err(e) => Err(e.into()),
    }
}
