//! HTML views - plain string rendering, no template engine.
//!
//! Rendering is deliberately thin: handlers pass already-resolved data in,
//! and everything user-supplied goes through `escape`. The post body is the
//! one exception - it is rich text authored through the editor and is
//! emitted as-is, matching the original site's behavior.

use inkwell_core::domain::{Comment, Post};
use inkwell_shared::PostForm;

use crate::middleware::auth::Identity;

/// Minimal HTML entity escaping for user-supplied text.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav(identity: Option<&Identity>) -> String {
    let mut links = String::from(
        r#"<a href="/">Home</a> <a href="/about">About</a> <a href="/contact">Contact</a>"#,
    );
    match identity {
        Some(user) => {
            links.push_str(r#" <a href="/new-post">New Post</a> <a href="/logout">Log Out</a>"#);
            links.push_str(&format!(
                r#" <span class="nav-user">{}</span>"#,
                escape(&user.name)
            ));
        }
        None => {
            links.push_str(r#" <a href="/login">Login</a> <a href="/register">Register</a>"#);
        }
    }
    links
}

fn layout(title: &str, identity: Option<&Identity>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Inkwell</title>
</head>
<body>
<nav>{nav}</nav>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        nav = nav(identity),
        body = body,
    )
}

fn inline_error(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        None => String::new(),
    }
}

/// GET / - every post, title/subtitle/author/date.
pub fn index(identity: Option<&Identity>, posts: &[(Post, String)]) -> String {
    let mut items = String::new();
    for (post, author) in posts {
        items.push_str(&format!(
            r#"<article>
<h2><a href="/post/{id}">{title}</a></h2>
<h3>{subtitle}</h3>
<p>Posted by {author} on {date}</p>
</article>
"#,
            id = post.id,
            title = escape(&post.title),
            subtitle = escape(&post.subtitle),
            author = escape(author),
            date = escape(&post.date),
        ));
    }
    layout("Home", identity, &items)
}

/// GET /register - registration form, optionally with an inline error.
pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}
<form method="post" action="/register">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Name <input type="text" name="name" required></label>
<button type="submit">Sign Me Up!</button>
</form>"#,
        error = inline_error(error),
    );
    layout("Register", None, &body)
}

/// GET /login - login form; `notice` carries the one-shot comment-gate
/// message, `error` an authentication failure.
pub fn login_page(notice: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log In</h1>
{notice}
{error}
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Let Me In!</button>
</form>"#,
        notice = inline_error(notice),
        error = inline_error(error),
    );
    layout("Log In", None, &body)
}

/// GET /post/{id} - one post with its comments and the comment form.
pub fn post_page(
    identity: Option<&Identity>,
    post: &Post,
    author: &str,
    comments: &[(Comment, String)],
) -> String {
    let mut comment_items = String::new();
    for (comment, name) in comments {
        comment_items.push_str(&format!(
            "<li><p>{}</p><cite>{}</cite></li>\n",
            escape(&comment.text),
            escape(name),
        ));
    }

    let admin_links = if identity.is_some_and(|u| u.is_admin()) {
        format!(
            r#"<p><a href="/edit-post/{id}">Edit Post</a> <a href="/delete/{id}">Delete</a></p>"#,
            id = post.id
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"<article>
<img src="{img}" alt="">
<h1>{title}</h1>
<h2>{subtitle}</h2>
<p>Posted by {author} on {date}</p>
<div class="post-body">{post_body}</div>
{admin_links}
</article>
<section>
<h3>Comments</h3>
<ul>
{comments}
</ul>
<form method="post" action="/post/{id}">
<label>Comment <textarea name="comment" required></textarea></label>
<button type="submit">Submit Comment</button>
</form>
</section>"#,
        img = escape(&post.img_url),
        title = escape(&post.title),
        subtitle = escape(&post.subtitle),
        author = escape(author),
        date = escape(&post.date),
        post_body = post.body,
        admin_links = admin_links,
        comments = comment_items,
        id = post.id,
    );
    layout(&post.title, identity, &body)
}

/// GET /new-post and /edit-post/{id} - the shared post form.
pub fn post_form_page(
    identity: Option<&Identity>,
    heading: &str,
    action: &str,
    values: Option<&PostForm>,
    error: Option<&str>,
) -> String {
    let blank = PostForm {
        title: String::new(),
        subtitle: String::new(),
        body: String::new(),
        img_url: String::new(),
    };
    let v = values.unwrap_or(&blank);

    let body = format!(
        r#"<h1>{heading}</h1>
{error}
<form method="post" action="{action}">
<label>Title <input type="text" name="title" value="{title}" required></label>
<label>Subtitle <input type="text" name="subtitle" value="{subtitle}" required></label>
<label>Image URL <input type="url" name="img_url" value="{img_url}" required></label>
<label>Body <textarea name="body" required>{form_body}</textarea></label>
<button type="submit">Submit Post</button>
</form>"#,
        heading = escape(heading),
        error = inline_error(error),
        action = escape(action),
        title = escape(&v.title),
        subtitle = escape(&v.subtitle),
        img_url = escape(&v.img_url),
        form_body = escape(&v.body),
    );
    layout(heading, identity, &body)
}

/// GET /about
pub fn about_page(identity: Option<&Identity>) -> String {
    layout(
        "About",
        identity,
        "<h1>About Us</h1>\n<p>A small blog about whatever comes to mind.</p>",
    )
}

/// GET /contact
pub fn contact_page(identity: Option<&Identity>) -> String {
    layout(
        "Contact",
        identity,
        "<h1>Contact</h1>\n<p>Reach the author at the usual place.</p>",
    )
}

/// Rendered error page for 403/404/500.
pub fn error_page(status: u16, title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>",
        status,
        escape(title),
        escape(message)
    );
    layout(title, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b a="1">&'"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_login_page_shows_gate_notice() {
        let page = login_page(Some("You must log in to add comments!"), None);
        assert!(page.contains("You must log in to add comments!"));
    }

    #[test]
    fn test_index_escapes_titles() {
        let post = Post::new(1, "<script>".into(), "s".into(), "b".into(), "i".into());
        let page = index(None, &[(post, "Ann".into())]);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
