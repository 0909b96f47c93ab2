use payloads::api_client::{FALLBACK_ERROR_MESSAGE, decode_envelope, server_message};
use payloads::requests::{ListQuery, SortOrder};
use payloads::responses::{ExamType, HierarchyNode, TestSeries};
use payloads::{ClientError, LevelType, NodeId, Pagination};
use reqwest::StatusCode;
use rust_decimal::dec;

#[test]
fn list_envelope_carries_items_and_pagination() {
    let body = r#"{
        "success": true,
        "data": [
            {"_id": "e1", "name": "Police Sub Inspector", "code": "PSI",
             "is_active": true, "created_at": "2024-05-01T10:00:00Z"}
        ],
        "pagination": {"total": 41, "page": 1, "limit": 20, "totalPages": 3}
    }"#;

    let envelope =
        decode_envelope::<Vec<ExamType>>(StatusCode::OK, body).unwrap();
    let items = envelope.data.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id.0, "e1");
    assert_eq!(items[0].code, "PSI");
    assert!(items[0].created_at.is_some());
    assert_eq!(
        envelope.pagination,
        Some(Pagination {
            total: 41,
            page: 1,
            limit: 20,
            total_pages: 3
        })
    );
}

#[test]
fn prices_decode_from_json_numbers() {
    let body = r#"{
        "success": true,
        "data": {"id": "t1", "title": "SSC CGL Full Mocks",
                 "exam_type_id": "e1", "price": 499, "discount_price": 299.5,
                 "total_tests": 30, "free_tests": 2, "validity_days": 365,
                 "is_active": true, "is_featured": false}
    }"#;

    let series = decode_envelope::<TestSeries>(StatusCode::OK, body)
        .unwrap()
        .data
        .unwrap();
    assert_eq!(series.price, dec!(499));
    assert_eq!(series.discount_price, Some(dec!(299.5)));
}

#[test]
fn nested_hierarchy_decodes_children() {
    let body = r#"{
        "success": true,
        "data": [{
            "id": "n1", "subjectId": "s1", "levelName": "Class 6",
            "levelType": "class", "parentId": null, "orderIndex": 0,
            "isActive": true,
            "children": [{
                "id": "n2", "subjectId": "s1", "levelName": "Fractions",
                "levelType": "chapter", "parentId": "n1", "orderIndex": 0,
                "isActive": true
            }]
        }]
    }"#;

    let forest = decode_envelope::<Vec<HierarchyNode>>(StatusCode::OK, body)
        .unwrap()
        .data
        .unwrap();
    assert_eq!(forest[0].level_type, LevelType::Class);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].parent_id, Some(NodeId::from("n1")));
    assert!(forest[0].children[0].children.is_empty());
}

#[test]
fn server_message_wins_for_failed_status() {
    let body = r#"{"success": false, "message": "Code already exists"}"#;
    let err = decode_envelope::<ExamType>(StatusCode::CONFLICT, body)
        .unwrap_err();
    assert!(matches!(err, ClientError::APIError(StatusCode::CONFLICT, _)));
    assert_eq!(err.user_message(), "Code already exists");
}

#[test]
fn status_text_is_used_without_server_message() {
    let err = decode_envelope::<ExamType>(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<html>oops</html>",
    )
    .unwrap_err();
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[test]
fn unauthorized_is_its_own_kind() {
    let body = r#"{"success": false, "message": "Token expired"}"#;
    let err = decode_envelope::<ExamType>(StatusCode::UNAUTHORIZED, body)
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Token expired");
}

#[test]
fn unsuccessful_body_with_ok_status_is_an_error() {
    let body = r#"{"success": false}"#;
    let err = decode_envelope::<ExamType>(StatusCode::OK, body).unwrap_err();
    assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
}

#[test]
fn malformed_record_is_a_decode_error() {
    let body = r#"{"success": true, "data": {"id": "e1"}}"#;
    let err = decode_envelope::<ExamType>(StatusCode::OK, body).unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.user_message().starts_with("Unexpected response from server"));
}

#[test]
fn server_message_reads_nested_error_objects() {
    assert_eq!(
        server_message(r#"{"error": {"message": "Invalid year"}}"#),
        Some("Invalid year".to_string())
    );
    assert_eq!(
        server_message(r#"{"error": "Not found"}"#),
        Some("Not found".to_string())
    );
    assert_eq!(server_message(r#"{"message": "  "}"#), None);
    assert_eq!(server_message("not json"), None);
}

#[test]
fn list_query_serializes_into_query_string() {
    let query = ListQuery {
        page: 2,
        search: Some("ssc".to_string()),
        sort_by: Some("name".to_string()),
        sort_order: Some(SortOrder::Asc),
        ..ListQuery::default()
    }
    .with_filter("examTypeId", "e1");

    let request = reqwest::Client::new()
        .get("http://localhost/api/admin/subjects")
        .query(&query)
        .build()
        .unwrap();

    assert_eq!(
        request.url().query(),
        Some("page=2&limit=20&search=ssc&sortBy=name&sortOrder=asc&examTypeId=e1")
    );
}

#[test]
fn list_walk_follows_reported_pages() {
    let query = ListQuery::everything().with_filter("examTypeId", "e1");
    let first = Pagination {
        total: 230,
        page: 1,
        limit: 100,
        total_pages: 3,
    };

    let next = query.next_page(Some(&first)).unwrap();
    assert_eq!(next.page, 2);
    assert_eq!(next.limit, 100);
    assert_eq!(next.filters.get("examTypeId").map(String::as_str), Some("e1"));

    let last = Pagination { page: 3, ..first };
    let third = next.next_page(Some(&Pagination { page: 2, ..first })).unwrap();
    assert!(third.next_page(Some(&last)).is_none());

    // Without pagination, or when the server ignores the page asked for,
    // the walk stops
    assert!(query.next_page(None).is_none());
    assert!(next.next_page(Some(&first)).is_none());
}
