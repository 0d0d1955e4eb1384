//! One-shot banners carried across a redirect in a cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::presentation::admin::views::AdminFlashView;

const FLASH_COOKIE: &str = "newsroom_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_variant(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }

    fn from_variant(value: &str) -> Option<Self> {
        match value {
            "success" => Some(FlashKind::Success),
            "error" => Some(FlashKind::Error),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }

    fn encode(&self) -> String {
        let payload = FlashPayload {
            kind: self.kind.as_variant().to_string(),
            text: self.text.clone(),
        };
        // An empty value decodes to no banner.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        let payload: FlashPayload = serde_json::from_slice(&bytes).ok()?;
        Some(Self {
            kind: FlashKind::from_variant(&payload.kind)?,
            text: payload.text,
        })
    }

    fn into_view(self) -> AdminFlashView {
        AdminFlashView {
            kind: self.kind.as_variant(),
            text: self.text,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct FlashPayload {
    kind: String,
    text: String,
}

pub(super) fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Read and clear the pending banner, if any.
pub(super) fn take_flash(jar: CookieJar) -> (CookieJar, Option<AdminFlashView>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_string()) else {
        return (jar, None);
    };

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Flash::decode(&value).map(Flash::into_view))
}

pub(super) fn redirect_with_flash(jar: CookieJar, flash: Flash, to: &str) -> Response {
    (set_flash(jar, &flash), Redirect::to(to)).into_response()
}
