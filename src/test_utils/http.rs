use axum::{
    body::Body,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use sha2::{Digest, Sha512};

use crate::flash::set_flash;

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(content_type_header, content_type);
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(get_header(response, "hx-redirect"), endpoint);
}

fn get_test_key() -> Key {
    Key::from(&Sha512::digest("test"))
}

/// A private cookie jar with a fixed key for handlers that take a jar.
pub(crate) fn get_test_jar() -> PrivateCookieJar {
    PrivateCookieJar::new(get_test_key())
}

/// A jar as the server sees it on the request after a redirect that set a
/// flash message, i.e. the encrypted cookie arrives in the `Cookie` header.
pub(crate) fn get_test_jar_with_flash(message: &str) -> PrivateCookieJar {
    let set_cookie_response = set_flash(get_test_jar(), message).into_response();
    let request_cookies = set_cookie_response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .collect::<Vec<_>>()
        .join("; ");

    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&request_cookies).expect("Could not build cookie header"),
    );

    PrivateCookieJar::from_headers(&headers, get_test_key())
}

#[track_caller]
pub(crate) fn assert_set_cookie(response: &Response<Body>, cookie_name: &str) {
    let prefix = format!("{cookie_name}=");
    let found = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|value| value.starts_with(&prefix)));

    assert!(found, "want a set-cookie header for {cookie_name}");
}

/// Assert the response tells the client to delete the cookie `cookie_name`.
#[track_caller]
pub(crate) fn assert_cookie_removed(response: &Response<Body>, cookie_name: &str) {
    let prefix = format!("{cookie_name}=");
    let removal = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix));

    match removal {
        Some(value) => assert!(
            value.contains("Max-Age=0"),
            "want {cookie_name} to be removed, got set-cookie {value:?}"
        ),
        None => panic!("want a set-cookie header removing {cookie_name}"),
    }
}
