// tests/strings_api.rs
// End-to-end HTTP behavior against both record stores


use axum::{body::Body, http::Request, http::StatusCode, Router};
use regex::Regex;
use serde_json::json;

use string_analyzer::analysis::sha256_hex;
use test_helpers::*;

async fn for_each_app<F, Fut>(scenario: F)
where
    F: Fn(Router) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    scenario(memory_app()).await;
    scenario(sqlite_app().await).await;
}

#[tokio::test]
async fn test_home_and_health() {
    for_each_app(|app| async move {
        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "nothing here."}));

        seed(&app, &["one"]).await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 1);
    })
    .await;
}

#[tokio::test]
async fn test_create_string_returns_full_record() {
    for_each_app(|app| async move {
        let (status, body) = send(&app, post_json("/strings", &json!({"value": "A Santa at NASA"}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let id = sha256_hex("A Santa at NASA");
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["value"], "A Santa at NASA");

        let props = &body["properties"];
        assert_eq!(props["length"], 15);
        assert_eq!(props["is_palindrome"], true);
        assert_eq!(props["unique_characters"], 4);
        assert_eq!(props["word_count"], 4);
        assert_eq!(props["sha256_hash"], id.as_str());
        assert_eq!(
            props["character_frequency_map"],
            json!({"a": 6, "s": 2, "n": 2, "t": 2})
        );

        let created_at = body["created_at"].as_str().unwrap();
        let format = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap();
        assert!(format.is_match(created_at), "bad created_at {created_at}");
    })
    .await;
}

#[tokio::test]
async fn test_duplicate_is_conflict() {
    for_each_app(|app| async move {
        seed(&app, &["repeat me"]).await;
        let (status, body) = send(&app, post_json("/strings", &json!({"value": "repeat me"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error_code"], "CONFLICT");

        let (_, listed) = send(&app, get("/strings")).await;
        assert_eq!(listed["count"], 1);
    })
    .await;
}

#[tokio::test]
async fn test_rejected_payloads() {
    for_each_app(|app| async move {
        let (status, _) = send(&app, post_json("/strings", &json!({"value": 12}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, post_json("/strings", &json!({"text": "hi"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let malformed = Request::builder()
            .method("POST")
            .uri("/strings")
            .header("content-type", "application/json")
            .body(Body::from("{\"value\": "))
            .unwrap();
        let (status, _) = send(&app, malformed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let plain_text = Request::builder()
            .method("POST")
            .uri("/strings")
            .header("content-type", "text/plain")
            .body(Body::from("value"))
            .unwrap();
        let (status, _) = send(&app, plain_text).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let (_, listed) = send(&app, get("/strings")).await;
        assert_eq!(listed["count"], 0);
    })
    .await;
}

#[tokio::test]
async fn test_get_and_delete_by_value() {
    for_each_app(|app| async move {
        seed(&app, &["hello world", "日本 語"]).await;

        let (status, body) = send(&app, get(&string_path("hello world"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["properties"]["word_count"], 2);

        let (status, body) = send(&app, get(&string_path("日本 語"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["properties"]["length"], 4);

        let (status, _) = send(&app, get(&string_path("absent"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, delete(&string_path("hello world"))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, _) = send(&app, delete(&string_path("hello world"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, get(&string_path("hello world"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
async fn test_delete_value_shadowed_by_natural_language_route() {
    for_each_app(|app| async move {
        seed(&app, &["filter-by-natural-language", "other"]).await;

        let (status, body) = send(&app, delete("/strings/filter-by-natural-language")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (_, listed) = send(&app, get("/strings")).await;
        assert_eq!(values_of(&listed), ["other"]);

        let (status, _) = send(&app, delete("/strings/filter-by-natural-language")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
async fn test_empty_string_is_listed_but_not_path_addressable() {
    for_each_app(|app| async move {
        seed(&app, &["", "abc"]).await;

        let (_, body) = send(&app, get("/strings?max_length=0")).await;
        assert_eq!(values_of(&body), [""]);
        assert_eq!(body["data"][0]["properties"]["is_palindrome"], true);
        assert_eq!(body["data"][0]["properties"]["word_count"], 0);

        let (status, _) = send(&app, get("/strings/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, delete("/strings/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listed) = send(&app, get("/strings")).await;
        assert_eq!(listed["count"], 2);
    })
    .await;
}

#[tokio::test]
async fn test_structured_filters() {
    for_each_app(|app| async move {
        seed(&app, &["a", "level", "hello world", "stats", "Zigzag"]).await;

        let (status, body) = send(&app, get("/strings")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 5);
        assert_eq!(body["filters_applied"], json!({}));

        let (_, body) = send(&app, get("/strings?is_palindrome=true&min_length=2")).await;
        assert_eq!(values_of(&body), ["level", "stats"]);
        assert_eq!(body["filters_applied"], json!({"is_palindrome": true, "min_length": 2}));

        let (_, body) = send(&app, get("/strings?is_palindrome=false&word_count=1")).await;
        assert_eq!(values_of(&body), ["Zigzag"]);

        let (_, body) = send(&app, get("/strings?max_length=5&contains_character=L")).await;
        assert_eq!(values_of(&body), ["level"]);
        assert_eq!(body["filters_applied"]["contains_character"], "l");

        let (_, body) = send(&app, get("/strings?contains_character=z")).await;
        assert_eq!(values_of(&body), ["Zigzag"]);
        assert_eq!(body["count"], 1);
    })
    .await;
}

#[tokio::test]
async fn test_invalid_structured_filters() {
    for_each_app(|app| async move {
        let (status, body) = send(&app, get("/strings?min_length=ten")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("min_length"));

        let (status, _) = send(&app, get("/strings?contains_character=ab")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    })
    .await;
}

#[tokio::test]
async fn test_blank_structured_filters_are_ignored() {
    for_each_app(|app| async move {
        seed(&app, &["level", "hello world"]).await;

        let (status, body) = send(
            &app,
            get("/strings?contains_character=&min_length=&max_length=%20&word_count="),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["filters_applied"], json!({}));
    })
    .await;
}

#[tokio::test]
async fn test_natural_language_filtering() {
    for_each_app(|app| async move {
        seed(&app, &["a", "racecar", "deified", "hello", "zoo zebra"]).await;

        let (status, body) = send(
            &app,
            get("/strings/filter-by-natural-language?query=Palindromic%20strings%20longer%20than%205"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(values_of(&body), ["racecar", "deified"]);
        assert_eq!(body["count"], 2);
        assert_eq!(
            body["interpreted_query"],
            json!({
                "original": "palindromic strings longer than 5",
                "parsed_filters": {"is_palindrome": true, "min_length": 6}
            })
        );

        let (_, body) = send(
            &app,
            get("/strings/filter-by-natural-language?query=strings%20containing%20the%20letter%20z"),
        )
        .await;
        assert_eq!(values_of(&body), ["zoo zebra"]);

        let (_, body) = send(
            &app,
            get("/strings/filter-by-natural-language?query=single%20word%20palindromes"),
        )
        .await;
        assert_eq!(values_of(&body), ["a", "racecar", "deified"]);
    })
    .await;
}

#[tokio::test]
async fn test_unparsable_natural_language() {
    for_each_app(|app| async move {
        let (status, body) = send(
            &app,
            get("/strings/filter-by-natural-language?query=banana%20smoothie%20recipe"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("natural language"));

        let (status, _) = send(&app, get("/strings/filter-by-natural-language?query=%20%20")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, get("/strings/filter-by-natural-language")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    })
    .await;
}
