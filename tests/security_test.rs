mod common;

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/classes")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let headers = resp.headers();
    assert!(headers.contains_key("content-security-policy"));
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(
        headers["referrer-policy"],
        "strict-origin-when-cross-origin"
    );
    assert_eq!(
        headers["permissions-policy"],
        "geolocation=(), microphone=(), camera=()"
    );
    assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
    assert_eq!(headers["cross-origin-resource-policy"], "same-origin");
}

#[tokio::test]
async fn error_responses_carry_security_headers() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["cross-origin-opener-policy"], "same-origin");
}
