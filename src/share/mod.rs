//! Shareable links carrying the crop in their query string.

use crate::crop::{encode_query, field_value, parse_query};
use crate::geometry::CropRect;
use crate::input::FieldKey;

/// Sets `x1`, `y1`, `x2` and `y2` on `base_url`. An existing key keeps the
/// position of its first occurrence and later duplicates are dropped; missing
/// keys are appended. Other parameters and the fragment stay in place.
pub fn share_url(base_url: &str, crop: CropRect) -> String {
    let (without_fragment, fragment) = match base_url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (base_url, None),
    };
    let (path, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));

    let mut written = [false; 4];
    let mut params = Vec::new();
    for (key, value) in parse_query(query) {
        let Some(field) = FieldKey::from_name(&key) else {
            params.push((key, value));
            continue;
        };
        let slot = field_slot(field);
        if !written[slot] {
            written[slot] = true;
            params.push((key, field_value(&crop, field).to_string()));
        }
    }
    for field in FieldKey::ALL {
        if !written[field_slot(field)] {
            params.push((field.name().to_string(), field_value(&crop, field).to_string()));
        }
    }

    let mut url = format!("{path}?{}", encode_query(&params));
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

fn field_slot(field: FieldKey) -> usize {
    match field {
        FieldKey::X1 => 0,
        FieldKey::Y1 => 1,
        FieldKey::X2 => 2,
        FieldKey::Y2 => 3,
    }
}

/// Extracts the query part of a full URL, or returns the input when it is
/// already a bare query string.
pub fn query_of(url_or_query: &str) -> &str {
    let without_fragment = url_or_query
        .split_once('#')
        .map_or(url_or_query, |(head, _)| head);
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains("://") => "",
        None => without_fragment,
    }
}
