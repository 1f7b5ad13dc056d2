use std::collections::HashMap;

use axum::{extract::Query, response::Html, routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/saludo", get(greeting))
        .route("/suma", get(sum))
}

pub async fn greeting() -> Html<&'static str> {
    Html("<h1>Hola 2DAW</h1>")
}

/// Lenient number parsing: absent or garbage is NaN, blank is 0.
fn loose_number(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None => f64::NAN,
        Some("") => 0.0,
        Some(s) => s.parse().unwrap_or(f64::NAN),
    }
}

fn render(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else {
        n.to_string()
    }
}

pub async fn sum(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    let a = loose_number(params.get("num1").map(String::as_str));
    let b = loose_number(params.get("num2").map(String::as_str));
    Html(format!(
        "La suma de {} y {} es {}",
        render(a),
        render(b),
        render(a + b)
    ))
}
