use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn response_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    String::from_utf8(body.to_vec()).expect("Response body was not valid UTF-8")
}

/// Parse a full page response, e.g. the menu or transactions page.
pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

/// Parse an htmx fragment response, e.g. an alert or a re-rendered form.
pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Assert that a parsed page carries the shared layout: valid markup, a
/// title, the nav bar and the alert container that error fragments target.
#[track_caller]
pub(crate) fn assert_page_layout(html: &Html) {
    assert_valid_html(html);

    for selector in ["title", "nav", "#alert-container"] {
        assert!(
            html.select(&Selector::parse(selector).unwrap()).next().is_some(),
            "Page is missing the shared layout element {selector:?}"
        );
    }
}
