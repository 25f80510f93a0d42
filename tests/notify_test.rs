use musikai::notify;
use reqwest::Client;

#[tokio::test]
async fn test_unconfigured_notification_is_not_sent() {
    unsafe {
        std::env::remove_var("RESEND_API_KEY");
        std::env::remove_var("ADMIN_EMAIL");
    }

    let sent =
        notify::send_signup_notification(&Client::new(), "someone@example.com", Some("Someone"))
            .await;

    assert!(!sent);
}
