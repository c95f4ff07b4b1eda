//! # Inkwell Shared
//!
//! Form payloads shared between the request handlers and the views.

pub mod dto;

pub use dto::{CommentForm, LoginForm, PostForm, RegisterForm};
