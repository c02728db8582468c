use super::*;

fn identity(email: &str) -> IdentitySnapshot {
    IdentitySnapshot { email: email.to_owned(), plan: "pro".to_owned(), credits: 42 }
}

#[test]
fn render_shell_shows_identity() {
    let page = render_shell(&identity("a@b.com"), Some(""));
    assert!(page.contains("<span class=\"email\">a@b.com</span>"));
    assert!(page.contains("<span class=\"plan\">pro</span>"));
    assert!(page.contains("42 credits"));
    assert!(page.contains("<form method=\"post\" action=\"/logout\">"));
    assert!(!page.contains("/auth/logout"));
}

#[test]
fn render_shell_highlights_active_tab_only() {
    let page = render_shell(&identity("a@b.com"), Some("billing"));
    assert!(page.contains("<a href=\"/app/billing\" class=\"active\">Billing</a>"));
    assert!(page.contains("<a href=\"/app\">Overview</a>"));
    assert_eq!(page.matches("class=\"active\"").count(), 1);
}

#[test]
fn render_shell_without_tab_highlights_nothing() {
    let page = render_shell(&identity("a@b.com"), None);
    assert!(!page.contains("class=\"active\""));
}

#[test]
fn render_shell_escapes_identity_fields() {
    let page = render_shell(&identity("<script>alert('x')</script>"), Some(""));
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;alert('x')&lt;/script&gt;"));
}

#[test]
fn render_shell_escapes_ampersands_in_plan() {
    let page = render_shell(&IdentitySnapshot { email: "a@b.com".into(), plan: "pro & teams".into(), credits: 0 }, None);
    assert!(page.contains("<span class=\"plan\">pro &amp; teams</span>"));
}

#[test]
fn pending_redirect_keeps_last_target() {
    let redirect = PendingRedirect::default();
    assert_eq!(redirect.take(), None);
    redirect.replace("/login");
    redirect.refresh();
    assert_eq!(redirect.take(), Some("/login".to_owned()));
    assert_eq!(redirect.take(), None);
}
