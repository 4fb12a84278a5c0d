use tagserve::http::response::{
    INTERNAL_ERROR_PAGE, NOT_FOUND_PAGE, Response, ResponseBuilder, StatusCode, welcome_page,
};
use tagserve::http::writer::{ResponseWriter, serialize_head, serialize_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Date", "d")
        .header("Server", "s")
        .header("Connection", "close")
        .header("Content-Type", "text/html")
        .body(b"test".to_vec())
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["Date", "Server", "Connection", "Content-Type"]);
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers.len(), 2);
    assert_eq!(response.headers[0], ("Content-Type".to_string(), "text/html".to_string()));
    assert_eq!(response.header("CONTENT-TYPE"), Some("text/html"));
}

#[test]
fn test_response_builder_adds_no_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"This is the body".to_vec())
        .build();

    assert!(response.header("Content-Length").is_none());
}

#[test]
fn test_response_welcome_helper() {
    let response = Response::welcome("Kat's WebServer");

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, welcome_page("Kat's WebServer").into_bytes());
    assert!(String::from_utf8(response.body).unwrap().contains("Welcome to Kat's WebServer"));
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, NOT_FOUND_PAGE.as_bytes());
}

#[test]
fn test_response_internal_error_helper() {
    let response = Response::internal_error();

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.body, INTERNAL_ERROR_PAGE.as_bytes());
}

#[test]
fn test_serialize_head_uses_crlf_and_blank_line() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Connection", "close")
        .header("Content-Type", "text/html")
        .body(b"<p>gone</p>".to_vec())
        .build();

    let head = serialize_head(&response);
    assert_eq!(
        head,
        b"HTTP/1.1 404 Not Found\r\nConnection: close\r\nContent-Type: text/html\r\n\r\n"
    );
}

#[test]
fn test_serialize_response_appends_body_after_single_blank_line() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "close")
        .body(b"\r\nbody starts with a newline".to_vec())
        .build();

    let wire = serialize_response(&response);
    let head_len = serialize_head(&response).len();

    assert_eq!(&wire[..head_len], b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n");
    assert_eq!(&wire[head_len..], b"\r\nbody starts with a newline");
}

#[tokio::test]
async fn test_response_writer_writes_head_then_body() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "close")
        .body(b"hello".to_vec())
        .build();
    let expected = serialize_response(&response);

    let mut out: Vec<u8> = Vec::new();
    ResponseWriter::new(response)
        .write_to_stream(&mut out)
        .await
        .unwrap();

    assert_eq!(out, expected);
}
