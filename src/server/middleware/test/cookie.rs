use super::*;

fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

/// Tests a signed cookie round trip through the cookie stage.
///
/// Verifies that a cookie set by one request is signed and read back
/// by the next request carrying it.
///
/// Expected: data "abc"
#[tokio::test]
async fn reads_back_signed_cookie() -> Result<(), TestError> {
    let client = client().await.unwrap();

    let set = client.get("/cookie/set").await?;
    let cookies = set.set_cookies();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("session="));
    assert!(!cookies[0].starts_with("session=abc;"));

    let request = Request::builder()
        .uri("/cookie/get")
        .header(header::COOKIE, cookie_pair(&cookies[0]))
        .body(Body::empty())?;
    let response = client.send(request).await?;

    assert_eq!(response.json()?["data"], json!("abc"));

    Ok(())
}

/// Tests that a cookie with a forged signature is ignored.
///
/// Expected: data null
#[tokio::test]
async fn ignores_tampered_cookie() -> Result<(), TestError> {
    let client = client().await.unwrap();

    let request = Request::builder()
        .uri("/cookie/get")
        .header(header::COOKIE, "session=abc")
        .body(Body::empty())?;
    let response = client.send(request).await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?["data"], Value::Null);

    Ok(())
}

/// Tests key derivation from a configured secret.
///
/// Expected: the same secret yields the same key
#[test]
fn derives_stable_key_from_secret() {
    use crate::server::middleware::cookie::cookie_key;

    let first = cookie_key(Some("a-long-enough-cookie-secret"));
    let second = cookie_key(Some("a-long-enough-cookie-secret"));
    let other = cookie_key(Some("another-secret"));

    assert_eq!(first.master(), second.master());
    assert_ne!(first.master(), other.master());
}

/// Tests removal of a signed cookie.
///
/// Expected: a Set-Cookie header expiring the cookie
#[tokio::test]
async fn removes_cookie() -> Result<(), TestError> {
    let client = client().await.unwrap();

    let request = Request::builder()
        .uri("/cookie/clear")
        .header(header::COOKIE, "session=abc")
        .body(Body::empty())?;
    let response = client.send(request).await?;

    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("session=;"));
    assert!(cookies[0].contains("Max-Age=0"));

    Ok(())
}
