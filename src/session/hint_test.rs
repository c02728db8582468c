use super::*;

#[test]
fn set_hint_is_script_readable_and_week_long() {
    let cookie = set_hint(true);
    assert_eq!(cookie.name(), "logged_in");
    assert_eq!(cookie.value(), "1");
    assert_eq!(cookie.http_only(), Some(false));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(Duration::days(7)));
}

#[test]
fn clear_hint_expires_immediately() {
    let cookie = clear_hint(false);
    assert_eq!(cookie.name(), "logged_in");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.secure(), Some(false));
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}
