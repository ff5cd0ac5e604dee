//! In-process stand-in for the Dienas API.
//!
//! Serves `GET /{resource}.{format}` with canned data so the client can be
//! exercised over real HTTP without touching the public service.

use std::{
    collections::HashMap,
    io::{self, Cursor, Write},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Local, NaiveDate};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Key accepted when none is configured.
pub const DEFAULT_KEY: &str = "test-key";

#[derive(Clone)]
struct AppState {
    key: Arc<str>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_KEY)
}

pub fn app_with_key(key: &str) -> Router {
    Router::new()
        .route("/{file}", get(resource))
        .with_state(AppState { key: Arc::from(key) })
}

/// Serve the mock API on `listener`, accepting only `key`.
pub async fn run(listener: TcpListener, key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(key)).await
}

async fn resource(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some((name, format)) = file.rsplit_once('.') else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if format != "json" && format != "xml" {
        return StatusCode::NOT_FOUND.into_response();
    }
    if params.get("key").map(String::as_str) != Some(&*state.key) {
        debug!(resource = name, "rejected key");
        return StatusCode::FORBIDDEN.into_response();
    }

    let lang = params.get("lang").map(String::as_str).unwrap_or("lv");
    let date = params.get("date").map(String::as_str);
    let value = match name {
        "namedays" => namedays(date),
        "banks" => banks(lang),
        "countries" => countries(lang),
        "currencyrates" => match currency_rates(date) {
            Some(value) => value,
            None => return StatusCode::BAD_REQUEST.into_response(),
        },
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    info!(resource = name, format, "served");

    if format == "xml" {
        match to_xml(&value) {
            Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
            Err(e) => {
                error!(resource = name, error = %e, "xml rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    } else {
        Json(value).into_response()
    }
}

/// Names for a `M-D` date; today's local date when absent.
pub fn namedays(date: Option<&str>) -> Value {
    let date = match date {
        Some(d) => d.to_string(),
        None => {
            let today = Local::now();
            format!("{}-{}", today.month(), today.day())
        }
    };
    let names: &[&str] = match date.as_str() {
        "1-1" => &["Laimnesis", "Solvita", "Solvija"],
        "2-14" => &["Valentīns"],
        "6-23" => &["Līga"],
        "6-24" => &["Jānis", "Jāņuks", "Janis"],
        "12-24" => &["Ādams", "Ieva"],
        "12-31" => &["Silvestrs", "Silvis", "Kalvis"],
        _ => &[],
    };
    json!(names)
}

pub fn banks(lang: &str) -> Value {
    let country = if lang == "en" { "Latvia" } else { "Latvija" };
    json!([
        { "name": "Swedbank", "swift": "HABALV22", "country": country },
        { "name": "SEB banka", "swift": "UNLALV2X", "country": country },
        { "name": "Citadele", "swift": "PARXLV22", "country": country },
    ])
}

pub fn countries(lang: &str) -> Value {
    let names: [(&str, &str, &str); 3] = [
        ("LV", "Latvija", "Latvia"),
        ("LT", "Lietuva", "Lithuania"),
        ("EE", "Igaunija", "Estonia"),
    ];
    names
        .iter()
        .map(|(code, lv, en)| {
            let name = if lang == "en" { en } else { lv };
            json!({ "code": code, "name": name })
        })
        .collect()
}

/// Rates for a `YYYY-MM-DD` date; `None` when the date does not parse.
pub fn currency_rates(date: Option<&str>) -> Option<Value> {
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()?,
        None => Local::now().date_naive(),
    };
    Some(json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "base": "EUR",
        "rates": { "USD": 1.0842, "GBP": 0.8571, "SEK": 11.2345 },
    }))
}

/// Render a JSON value as an XML document rooted at `<response>`.
///
/// Arrays become repeated `<item>` children, object keys become child
/// elements with names coerced into valid XML names.
pub fn to_xml(value: &Value) -> io::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, "response", value)?;
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_element<W: Write>(writer: &mut Writer<W>, tag: &str, value: &Value) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    match value {
        Value::Null => {}
        Value::Bool(b) => writer.write_event(Event::Text(BytesText::new(&b.to_string())))?,
        Value::Number(n) => writer.write_event(Event::Text(BytesText::new(&n.to_string())))?,
        Value::String(s) => writer.write_event(Event::Text(BytesText::new(s)))?,
        Value::Array(items) => {
            for item in items {
                write_element(writer, "item", item)?;
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                write_element(writer, &element_name(name), field)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

/// Map an arbitrary object key onto an XML element name.
fn element_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}
