//! One-shot notices that survive a redirect.
//!
//! A create or update endpoint stores a message in an encrypted cookie before
//! redirecting, and the page it redirects to takes the message out of the
//! cookie and shows it as a success alert.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

const COOKIE_FLASH: &str = "flash";

/// Store `message` to be shown on the next page load.
pub fn set_flash(jar: PrivateCookieJar, message: &str) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_FLASH, message.to_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Remove the pending notice from `jar`, returning it if there was one.
///
/// The returned jar must be included in the response so the client drops the cookie.
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    match jar.get(COOKIE_FLASH) {
        Some(cookie) => {
            let message = cookie.value().to_owned();
            let jar = jar.remove(Cookie::build(COOKIE_FLASH).path("/"));

            (jar, Some(message))
        }
        None => (jar, None),
    }
}
