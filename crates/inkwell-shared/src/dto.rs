//! Data Transfer Objects - urlencoded form payloads for the site.
//!
//! Syntactic field validation (required, email shape) belongs to the form
//! layer in the browser; these types only carry the values.

use serde::{Deserialize, Serialize};

/// Payload of the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Payload of the login form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Payload of the create/edit post form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

/// Payload of the comment form on a post page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub comment: String,
}
