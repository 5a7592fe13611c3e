use std::sync::Arc;

use athlete_diary_api::{
    config::CollectionNames,
    db::MemoryStore,
    routes,
    services::session::MemorySessionStore,
    AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mongodb::bson::{doc, Bson};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    store: Arc<MemoryStore>,
}

async fn setup() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(
            "roster",
            [doc! { "player_id": "P001" }, doc! { "player_id": "P002" }],
        )
        .await;

    let state = AppState {
        store: store.clone(),
        sessions: Arc::new(MemorySessionStore::default()),
        collections: Arc::new(CollectionNames::default()),
    };

    TestApp {
        app: routes::router(state),
        store,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = session {
            builder = builder.header("X-Session-Id", id);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(&self) -> String {
        let (status, body) = self.send("POST", "/sessions", None, None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }
}

fn breakfast() -> Value {
    json!({
        "player_id": "P001",
        "date": 20240115,
        "day_type": "Training",
        "meal_type": "Breakfast",
        "elements": [
            { "time": "08:00", "food_product": "Oatmeal", "amount_value": 200, "amount_unit": "g" }
        ]
    })
}

#[tokio::test]
async fn meal_submission_stores_one_document() {
    let app = setup().await;
    let session = app.new_session().await;

    let (status, body) = app
        .send("POST", "/meals", Some(&session), Some(breakfast()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Your meal has been added successfully!");

    let docs = app.store.documents("meal_diary_entries").await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get_object_id("_id").unwrap().to_hex(), body["id"]);
    assert_eq!(docs[0].get("meal_date"), Some(&Bson::Int32(20240115)));
    assert_eq!(docs[0].get_array("meal_elements").unwrap().len(), 1);
}

#[tokio::test]
async fn weight_submission_keeps_numeric_weights() {
    let app = setup().await;
    let session = app.new_session().await;

    let (status, _) = app
        .send(
            "POST",
            "/weights",
            Some(&session),
            Some(json!({
                "player_id": "P001",
                "date": 20240115,
                "day_type": "Match",
                "weight_before": 72.5,
                "weight_after": 71.8
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let docs = app.store.documents("weight_registration").await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get("weight_before"), Some(&Bson::Double(72.5)));
    assert_eq!(docs[0].get("weight_after"), Some(&Bson::Double(71.8)));
    assert_eq!(docs[0].get_str("day_type").unwrap(), "Match");
}

#[tokio::test]
async fn selection_survives_consecutive_submissions() {
    let app = setup().await;
    let session = app.new_session().await;

    let (status, _) = app
        .send(
            "PUT",
            "/sessions/player",
            Some(&session),
            Some(json!({ "player_id": "P002" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let mut meal = breakfast();
    meal.as_object_mut().unwrap().remove("player_id");
    for _ in 0..2 {
        let (status, _) = app
            .send("POST", "/meals", Some(&session), Some(meal.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = app
        .send(
            "POST",
            "/weights",
            Some(&session),
            Some(json!({
                "date": 20240115,
                "day_type": "Training",
                "weight_before": 80.0,
                "weight_after": 79.4
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let meals = app.store.documents("meal_diary_entries").await;
    assert_eq!(meals.len(), 2);
    assert!(meals.iter().all(|d| d.get_str("player_id").unwrap() == "P002"));
    let weights = app.store.documents("weight_registration").await;
    assert_eq!(weights[0].get_str("player_id").unwrap(), "P002");

    let (_, body) = app.send("GET", "/sessions", Some(&session), None).await;
    assert_eq!(body["selected_player"], "P002");
}

#[tokio::test]
async fn pending_elements_become_the_meal() {
    let app = setup().await;
    let session = app.new_session().await;

    for product in ["Bread", "Cheese"] {
        let (status, _) = app
            .send(
                "POST",
                "/sessions/meal-elements",
                Some(&session),
                Some(json!({
                    "time": "12:15",
                    "food_product": product,
                    "amount_value": 2,
                    "amount_unit": "snede"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let mut meal = breakfast();
    meal.as_object_mut().unwrap().remove("elements");
    meal["meal_type"] = json!("Lunch");
    let (status, _) = app.send("POST", "/meals", Some(&session), Some(meal)).await;
    assert_eq!(status, StatusCode::CREATED);

    let docs = app.store.documents("meal_diary_entries").await;
    let elements = docs[0].get_array("meal_elements").unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(
        elements[1].as_document().unwrap().get_str("food_product").unwrap(),
        "Cheese"
    );

    let (_, body) = app.send("GET", "/sessions", Some(&session), None).await;
    assert_eq!(body["pending_elements"], json!([]));
}

#[tokio::test]
async fn invalid_element_reports_field_and_writes_nothing() {
    let app = setup().await;
    let session = app.new_session().await;

    let mut meal = breakfast();
    meal["elements"][0]["amount_value"] = json!(0);
    let (status, body) = app.send("POST", "/meals", Some(&session), Some(meal)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "meal_elements[0].amount_value");
    assert!(app.store.documents("meal_diary_entries").await.is_empty());
}

#[tokio::test]
async fn submissions_require_a_session() {
    let app = setup().await;

    let (status, _) = app.send("POST", "/meals", None, Some(breakfast())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send("POST", "/meals", Some("not-a-uuid"), Some(breakfast()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let session = app.new_session().await;
    let (status, _) = app.send("DELETE", "/sessions", Some(&session), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send("GET", "/sessions", Some(&session), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn outage_disables_forms_and_fails_submissions() {
    let app = setup().await;
    let session = app.new_session().await;
    app.store.set_offline(true);

    let (status, form) = app
        .send("GET", "/forms/food-diary", Some(&session), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["submission_enabled"], false);
    assert!(form["warning"].is_string());

    let (status, _) = app.send("GET", "/roster", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = app
        .send("POST", "/meals", Some(&session), Some(breakfast()))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn roster_forms_and_info_are_served() {
    let app = setup().await;
    let session = app.new_session().await;

    let (status, body) = app.send("GET", "/roster", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["players"], json!(["P001", "P002"]));

    let (_, form) = app.send("GET", "/forms/weight", Some(&session), None).await;
    assert_eq!(form["submission_enabled"], true);
    assert_eq!(form["day_types"], json!(["Match", "Wedstrijd", "Training"]));

    let (_, form) = app
        .send("GET", "/forms/food-diary", Some(&session), None)
        .await;
    assert_eq!(form["meal_types"], json!(["Breakfast", "Lunch", "Dinner", "Snack"]));

    let (status, info) = app.send("GET", "/info", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["guidelines"].as_array().unwrap().len(), 6);

    let (status, health) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["db"], "connected");
    assert_eq!(health["sessions"], "connected");
}

#[tokio::test]
async fn mistyped_body_fields_get_the_error_shape() {
    let app = setup().await;
    let session = app.new_session().await;

    let (status, body) = app
        .send(
            "POST",
            "/weights",
            Some(&session),
            Some(json!({
                "player_id": "P001",
                "date": 20240115,
                "day_type": "Match",
                "weight_before": "72.5",
                "weight_after": 71.8
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "weight_before");
    assert!(body["error"].as_str().unwrap().contains("weight_before"));
    assert!(app.store.documents("weight_registration").await.is_empty());

    let (status, body) = app
        .send(
            "POST",
            "/sessions/meal-elements",
            Some(&session),
            Some(json!({ "time": "08:00", "food_product": "Oatmeal", "amount_value": "lots", "amount_unit": "g" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "amount_value");
    assert!(body["error"].is_string());
}
