use axum::http::StatusCode;
use axum_test::TestServer;
use moodlog::{app::build_app, foods::catalog::FoodCatalog, state::AppState};
use serde_json::{json, Value};

const CATALOG: &str = r#"{
    "FoundationFoods": [
        {
            "fdcId": 321358,
            "description": "Hummus, commercial",
            "foodNutrients": [{"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 7.35}]
        },
        {
            "fdcId": 321360,
            "description": "Tomatoes, grape, raw",
            "foodNutrients": [{"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 0.83}]
        }
    ]
}"#;

fn server_with(catalog: FoodCatalog) -> (TestServer, AppState) {
    let state = AppState::in_memory(catalog);
    let server = TestServer::new(build_app(state.clone())).unwrap();
    (server, state)
}

fn server() -> TestServer {
    server_with(FoodCatalog::from_json(CATALOG).unwrap()).0
}

#[tokio::test]
async fn day_roundtrip_over_http() {
    let server = server();

    let res = server
        .post("/api/day")
        .json(&json!({"date": "2025-06-01", "hour": 5, "mood": 3, "notes": "ok"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!({"status": "success", "date": "2025-06-01", "hour": 5})
    );

    let res = server.get("/api/day").add_query_param("date", "2025-06-01").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let day = res.json::<Vec<Value>>();
    assert_eq!(day.len(), 24);
    assert_eq!(day[5], json!({"hour": 5, "mood": 3, "notes": "ok"}));
    assert_eq!(day[0], json!({"hour": 0, "mood": null, "notes": null}));
}

#[tokio::test]
async fn optional_fields_may_be_omitted() {
    let server = server();
    let res = server
        .post("/api/day")
        .json(&json!({"date": "2025-06-02", "hour": 23}))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let day = server
        .get("/api/day")
        .add_query_param("date", "2025-06-02")
        .await
        .json::<Vec<Value>>();
    assert_eq!(day[23], json!({"hour": 23, "mood": null, "notes": null}));
}

#[tokio::test]
async fn malformed_day_requests_are_400() {
    let server = server();

    let res = server.get("/api/day").add_query_param("date", "2025-13-40").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>()["detail"].as_str().unwrap().contains("2025-13-40"));

    for hour in [24, -1] {
        let res = server
            .post("/api/day")
            .json(&json!({"date": "2025-06-01", "hour": hour}))
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    }

    let res = server
        .post("/api/day")
        .json(&json!({"date": "June 1st", "hour": 1}))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undecodable_day_requests_are_400_with_detail() {
    let server = server();

    for body in [
        json!({"date": "2025-06-01", "hour": 1e20}),
        json!({"date": "2025-06-01", "hour": 5.5}),
        json!({"date": 20250601, "hour": 1}),
        json!({"hour": 1}),
    ] {
        let res = server.post("/api/day").json(&body).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST, "{}", body);
        assert!(res.json::<Value>()["detail"].is_string(), "{}", body);
    }

    let res = server.get("/api/day").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>()["detail"].as_str().unwrap().contains("date"));

    let res = server
        .post("/api/recipe")
        .json(&json!({"name": "Snack", "food_fdc_ids": "321358"}))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn foods_limit_applies_without_search() {
    let server = server();
    let res = server.get("/api/foods").add_query_param("limit", "1").await;
    assert_eq!(
        res.json::<Value>(),
        json!([{"fdcId": 321358, "description": "Hummus, commercial"}])
    );

    let res = server.get("/api/foods").add_query_param("limit", "lots").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert!(res.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn foods_listing() {
    let server = server();
    let res = server.get("/api/foods").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>(),
        json!([
            {"fdcId": 321358, "description": "Hummus, commercial"},
            {"fdcId": 321360, "description": "Tomatoes, grape, raw"}
        ])
    );

    let res = server.get("/api/foods").add_query_param("q", "tomato").await;
    assert_eq!(res.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn foods_404_without_catalog() {
    let (server, _) = server_with(FoodCatalog::default());
    let res = server.get("/api/foods").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recipe_create_and_fetch() {
    let server = server();

    let res = server
        .post("/api/recipe")
        .json(&json!({"name": "Snack Plate", "food_fdc_ids": [321358, 321360]}))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert!(res.json::<Value>()["message"].as_str().unwrap().contains("Snack Plate"));

    let res = server
        .post("/api/recipe")
        .json(&json!({"name": "snack plate", "food_fdc_ids": [1]}))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let res = server.get("/api/recipe/SNACK%20PLATE").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body = res.json::<Value>();
    assert_eq!(body["name"], "SNACK PLATE");
    assert_eq!(body["foods"].as_array().unwrap().len(), 2);
    assert_eq!(body["foods"][0]["fdcId"], 321358);
    assert_eq!(body["nutrient_totals"]["Protein"]["unit"], "g");
    assert_eq!(
        body["foods"][1],
        json!({
            "fdcId": 321360,
            "description": "Tomatoes, grape, raw",
            "foodNutrients": [{"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 0.83}]
        })
    );
}

#[tokio::test]
async fn missing_recipe_is_404() {
    let server = server();
    let res = server.get("/api/recipe/missing").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_store_state() {
    let (server, state) = server_with(FoodCatalog::default());

    let res = server.get("/api/health").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>(), json!({"status": "ok"}));

    state.shutdown().await;
    let res = server.get("/api/health").await;
    assert_eq!(res.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json::<Value>()["status"], "error");

    // other store-backed routes fail as server errors once the store is gone
    let res = server.get("/api/day").add_query_param("date", "2025-06-01").await;
    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
