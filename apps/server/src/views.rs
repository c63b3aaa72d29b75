//! HTML rendering for the admin users page.

use std::fmt::Write;

use entities::User;

const EMPTY_MOOD: &str = "—";

/// Renders the full users page.
pub fn users_page(users: &[User]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Registered Users</title>\n<style>\n\
         body { background: #0a0a0a; color: #f5f5f5; font-family: sans-serif; padding: 2rem; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border-bottom: 1px solid #333; padding: 0.5rem 1rem; text-align: left; }\n\
         </style>\n</head>\n<body>\n<h1>Registered Users</h1>\n",
    );

    let _ = writeln!(html, "<p>Total users: {}</p>", users.len());
    html.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Mood</th><th>Date Registered</th></tr></thead>\n<tbody>\n",
    );
    if users.is_empty() {
        html.push_str("<tr><td colspan=\"4\">No users yet.</td></tr>\n");
    }
    for user in users {
        html.push_str(&user_row(user));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("</body>\n</html>\n");
    html
}

fn user_row(user: &User) -> String {
    let mood = match user.mood {
        Some(mood) => format!(
            "<td style=\"color: {}\">{}</td>",
            mood.theme().colors.primary,
            mood.as_str().to_uppercase()
        ),
        None => format!("<td>{EMPTY_MOOD}</td>"),
    };

    format!(
        "<tr><td>{}</td><td>{}</td>{}<td>{}</td></tr>\n",
        user.id,
        escape_html(&user.name),
        mood,
        user.created_at.format("%B %-d, %Y at %-I:%M %p UTC")
    )
}

/// Escapes text for use inside HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use entities::{Mood, NewUser};

    use super::*;

    fn user(id: i64, name: &str, mood: Option<Mood>) -> User {
        let mut user = NewUser::new(name).into_user(id);
        user.mood = mood;
        user.created_at = Utc.with_ymd_and_hms(2026, 12, 31, 21, 5, 0).unwrap();
        user
    }

    #[test]
    fn test_empty_page() {
        let html = users_page(&[]);
        assert!(html.contains("Total users: 0"));
        assert!(html.contains("<td colspan=\"4\">No users yet.</td>"));
    }

    #[test]
    fn test_rows() {
        let html = users_page(&[user(2, "Grace", None), user(1, "Ada", Some(Mood::Bold))]);

        assert!(html.contains("Total users: 2"));
        assert!(!html.contains("No users yet."));
        assert!(html.contains("<td>2</td><td>Grace</td><td>—</td>"));
        assert!(html.contains("<td>1</td><td>Ada</td><td style=\"color: #00d9ff\">BOLD</td>"));
        assert!(html.contains("December 31, 2026 at 9:05 PM UTC"));
        assert!(html.find("Grace").unwrap() < html.find("Ada").unwrap());
    }

    #[test]
    fn test_names_are_escaped() {
        let html = users_page(&[user(1, "<b>x</b>", None)]);
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("<b>x</b>"));
    }
}
