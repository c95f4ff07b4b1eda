use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Post entity - a blog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Assigned by the store on insert; 0 until then.
    pub id: i32,
    pub author_id: i32,
    /// Unique across all posts; the store rejects duplicates.
    pub title: String,
    pub subtitle: String,
    /// Human-readable publication date, formatted once at creation and never
    /// refreshed on edit.
    pub date: String,
    pub body: String,
    pub img_url: String,
}

impl Post {
    /// Create a post dated today, pending insertion.
    pub fn new(
        author_id: i32,
        title: String,
        subtitle: String,
        body: String,
        img_url: String,
    ) -> Self {
        Self {
            id: 0,
            author_id,
            title,
            subtitle,
            date: Utc::now().format("%B %d, %Y").to_string(),
            body,
            img_url,
        }
    }

    /// Apply an edit: every field but the publication date is replaced, and
    /// authorship moves to the acting identity.
    pub fn apply_edit(
        &mut self,
        editor_id: i32,
        title: String,
        subtitle: String,
        body: String,
        img_url: String,
    ) {
        self.author_id = editor_id;
        self.title = title;
        self.subtitle = subtitle;
        self.body = body;
        self.img_url = img_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_keeps_date_and_reassigns_author() {
        let mut post = Post::new(1, "T".into(), "S".into(), "B".into(), "img".into());
        let date = post.date.clone();

        post.apply_edit(2, "T2".into(), "S2".into(), "B2".into(), "img2".into());

        assert_eq!(post.date, date);
        assert_eq!(post.author_id, 2);
        assert_eq!(post.title, "T2");
    }

    #[test]
    fn test_date_is_human_readable() {
        let post = Post::new(1, "T".into(), "S".into(), "B".into(), "img".into());
        // "%B %d, %Y" always contains a comma and a spelled-out month.
        assert!(post.date.contains(", "));
    }
}
