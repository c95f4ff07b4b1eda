//! Domain entities - the core business objects.

mod comment;
mod gate;
mod post;
mod user;

pub use comment::Comment;
pub use gate::CommentGate;
pub use post::Post;
pub use user::{Role, User};
