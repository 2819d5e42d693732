//! Parsing functions for orders API responses.
//!
//! Sync helpers that pull human-readable messages out of error bodies and
//! derive local file names from download responses.

use serde_json::Value;
use url::Url;

/// File name used when neither the response headers nor the URL name one.
pub const DEFAULT_FILENAME: &str = "download";

// ============================================================================
// Error Messages
// ============================================================================

/// Extract the server's message from an error body.
///
/// Uses the JSON `message` field when present, otherwise the body as-is.
pub fn server_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Join the validation messages of a rejected order request.
///
/// The service nests messages as `{"general": [{"message"}], "field":
/// {"<Name>": [{"message"}]}}` where the field names vary. The first
/// general message and the first field message are joined with ` - `;
/// whichever exists alone is returned on its own.
pub fn bad_query_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    let general = json
        .get("general")
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
        .and_then(message_of);

    let field = json
        .get("field")
        .and_then(Value::as_object)
        .and_then(|fields| fields.values().find_map(first_message));

    match (general, field) {
        (Some(general), Some(field)) => Some(format!("{general} - {field}")),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

fn first_message(messages: &Value) -> Option<String> {
    messages.as_array()?.first().and_then(message_of)
}

fn message_of(entry: &Value) -> Option<String> {
    entry.get("message").and_then(Value::as_str).map(str::to_string)
}

// ============================================================================
// File Names
// ============================================================================

/// Choose the local file name for a download.
///
/// Order of preference: `Content-Disposition` header, last URL path
/// segment, then [`DEFAULT_FILENAME`].
pub fn derive_filename(content_disposition: Option<&str>, url: &Url) -> String {
    content_disposition
        .and_then(filename_from_content_disposition)
        .or_else(|| filename_from_url(url))
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

/// Parse the file name out of a `Content-Disposition` header.
///
/// `filename*` (RFC 5987, percent-encoded) wins over `filename`. Only the
/// final path component is kept.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_params(header).into_iter().skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = decode_extended_value(value),
            "filename" => plain = Some(value.trim_matches('"').to_string()),
            _ => {}
        }
    }

    extended.or(plain).and_then(|name| sanitize(&name))
}

/// Split header parameters on `;`, except inside double-quoted values.
fn split_params(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in header.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&header[start..]);
    params
}

/// Decode an RFC 5987 value such as `UTF-8''na%C3%AFve.tif`.
fn decode_extended_value(value: &str) -> Option<String> {
    let (_charset_and_lang, encoded) = value.split_once("''")?;
    urlencoding::decode(encoded.trim_matches('"'))
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Take the last non-empty path segment of a URL, ignoring query and fragment.
pub fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(segment).ok()?;
    sanitize(&decoded)
}

/// Strip directories and reject names that would not create a file.
fn sanitize(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        _ => Some(base.to_string()),
    }
}
