use serde::{Deserialize, Serialize};

/// Comment entity - free text attached to a post by a logged-in user.
///
/// Comments are created through the comment workflow only and are never
/// edited or deleted on their own; deleting a post removes its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Assigned by the store on insert; 0 until then.
    pub id: i32,
    pub author_id: i32,
    pub post_id: i32,
    pub text: String,
}

impl Comment {
    pub fn new(author_id: i32, post_id: i32, text: String) -> Self {
        Self {
            id: 0,
            author_id,
            post_id,
            text,
        }
    }
}
