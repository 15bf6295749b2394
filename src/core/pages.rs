//! Server-rendered HTML pages
//!
//! Minimal markup for both services' forms and views, built with plain
//! string formatting behind one layout helper. All user-supplied text is
//! escaped before interpolation.

use crate::core::db::models::{Account, LoginAttempt};

/// Escape text for safe interpolation into HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Shared page chrome.
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - BankStack</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Login form, with an optional expiry notice and an optional error banner.
pub fn login_page(session_expired: bool, error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Sign in</h1>\n");

    if session_expired {
        body.push_str(r#"<p class="notice">Your session has expired. Please sign in again.</p>"#);
        body.push('\n');
    }
    if let Some(message) = error {
        body.push_str(&format!(r#"<p class="error">{}</p>"#, escape(message)));
        body.push('\n');
    }

    body.push_str(
        r#"<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Sign in</button>
</form>
<p><a href="/register">Create an account</a> | <a href="/forgot-password">Forgot password?</a></p>"#,
    );

    layout("Sign in", &body)
}

/// Registration form with an optional error banner.
pub fn register_page(error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Register</h1>\n");

    if let Some(message) = error {
        body.push_str(&format!(r#"<p class="error">{}</p>"#, escape(message)));
        body.push('\n');
    }

    body.push_str(
        r#"<form method="post" action="/register">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Register</button>
</form>
<p><a href="/login">Back to sign in</a></p>"#,
    );

    layout("Register", &body)
}

/// Password reset request form.
pub fn forgot_password_page() -> String {
    let body = r#"<h1>Reset password</h1>
<form method="post" action="/forgot-password">
<label>Email <input type="email" name="email" required></label>
<button type="submit">Send reset link</button>
</form>
<p><a href="/login">Back to sign in</a></p>"#;

    layout("Reset password", body)
}

/// Mocked reset confirmation.
pub fn reset_notice_page(email: &str) -> String {
    let body = format!(
        r#"<h1>Reset password</h1>
<p>A password reset link has been sent to <strong>{}</strong>. (This demo does not actually send email.)</p>
<p><a href="/login">Back to sign in</a></p>"#,
        escape(email),
    );

    layout("Reset password", &body)
}

/// Authenticated dashboard: the subject's identity plus recent login
/// activity.
pub fn dashboard_page(email: &str, attempts: &[LoginAttempt]) -> String {
    let mut body = format!(
        r#"<h1>Dashboard</h1>
<p>Signed in as <strong>{}</strong></p>
<p><a href="/logout">Sign out</a></p>
<h2>Recent login activity</h2>"#,
        escape(email),
    );

    if attempts.is_empty() {
        body.push_str("\n<p>No recorded attempts.</p>");
    } else {
        body.push_str("\n<table>\n<tr><th>Time (UTC)</th><th>Source IP</th><th>Outcome</th></tr>\n");
        for attempt in attempts {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                attempt.attempted_at.format("%Y-%m-%d %H:%M:%S"),
                escape(&attempt.source_ip),
                escape(&attempt.outcome),
            ));
        }
        body.push_str("</table>");
    }

    layout("Dashboard", &body)
}

/// Account view, or the creation form when no account exists yet.
pub fn account_page(email: &str, account: Option<&Account>) -> String {
    let body = match account {
        Some(account) => format!(
            r#"<h1>Your account</h1>
<p>Owner: <strong>{}</strong></p>
<p>Type: {}</p>
<p>Balance: {:.2}</p>"#,
            escape(email),
            escape(&account.account_type),
            account.balance,
        ),
        None => format!(
            r#"<h1>Open an account</h1>
<p>No account yet for <strong>{}</strong>.</p>
<form method="post" action="/ui/account">
<label>Account type
<select name="account_type">
<option value="checking">Checking</option>
<option value="savings">Savings</option>
</select>
</label>
<button type="submit">Create account</button>
</form>"#,
            escape(email),
        ),
    };

    layout("Account", &body)
}

/// Generic message page used for error responses.
pub fn message_page(title: &str, text: &str) -> String {
    let body = format!(
        r#"<h1>{}</h1>
<p>{}</p>
<p><a href="/login">Back to sign in</a></p>"#,
        escape(title),
        escape(text),
    );

    layout(title, &body)
}
