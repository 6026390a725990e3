use crate::helper::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn customer_listing_never_exposes_passwords() {
    let app = spawn_app().await;
    let response = app
        .register(&json!({
            "fullname": "Niran Chaiyo",
            "address": "7 Beach Rd, Pattaya",
            "phone": "0811111111",
            "email": "niran@example.com",
            "username": "niran",
            "password": "tom-yum-goong"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let token = app.login_test_user().await;

    let response = app.get_authorized("/customers", &token).await;

    assert_eq!(response.status().as_u16(), 200);
    let raw = response.text().await.unwrap();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("$argon2"));
    assert!(!raw.contains("tom-yum-goong"));

    let customers: Vec<Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(customers.len(), 2);
    for customer in &customers {
        let fields = customer.as_object().unwrap();
        for key in ["id", "username", "fullname", "email", "phone", "address"] {
            assert!(fields.contains_key(key), "missing {}", key);
        }
        assert_eq!(fields.len(), 6);
    }
    assert!(customers.iter().any(|c| c["username"] == "niran"));
    app.cleanup().await;
}
