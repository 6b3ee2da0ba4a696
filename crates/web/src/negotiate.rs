//! `Accept` header negotiation.

use http::HeaderMap;
use http::header::ACCEPT;
use mime::Mime;

/// The quality the request's `Accept` header gives `target`.
///
/// The most specific matching media range decides; a request without `Accept` accepts everything at 1.0.
pub fn quality(headers: &HeaderMap, target: &Mime) -> f32 {
    let mut ranges = headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|range| range.trim().parse::<Mime>().ok())
        .peekable();

    if ranges.peek().is_none() {
        return 1.0;
    }

    let mut best: Option<(u8, f32)> = None;
    for range in ranges {
        let Some(specificity) = specificity(&range, target) else {
            continue;
        };
        if best.is_none_or(|(s, _)| specificity > s) {
            best = Some((specificity, q(&range)));
        }
    }

    best.map_or(0.0, |(_, q)| q)
}

/// Whether an HTML page suits the request better than JSON.
pub fn prefers_html(headers: &HeaderMap) -> bool {
    let html = quality(headers, &mime::TEXT_HTML);
    html > 0.0 && html > quality(headers, &mime::APPLICATION_JSON)
}

fn specificity(range: &Mime, target: &Mime) -> Option<u8> {
    if range.type_() == mime::STAR && range.subtype() == mime::STAR {
        Some(0)
    } else if range.type_() != target.type_() {
        None
    } else if range.subtype() == mime::STAR {
        Some(1)
    } else if range.subtype() == target.subtype() {
        Some(2)
    } else {
        None
    }
}

fn q(range: &Mime) -> f32 {
    range.get_param("q").and_then(|q| q.as_str().parse::<f32>().ok()).map_or(1.0, |q| q.clamp(0.0, 1.0))
}
