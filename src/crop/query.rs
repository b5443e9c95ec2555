use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::geometry::CropRect;
use crate::input::{parse_coordinate, FieldKey};

use super::{field_value, CropPatch};

pub fn to_query_params(crop: CropRect) -> Vec<(&'static str, String)> {
    FieldKey::ALL
        .into_iter()
        .map(|key| (key.name(), field_value(&crop, key).to_string()))
        .collect()
}

/// Overlays recognized crop keys onto `crop`. The first occurrence of a key
/// wins; unknown keys are ignored and unparsable values read as 0.
pub fn apply_query_params<I, K, V>(crop: CropRect, params: I) -> CropRect
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut patch = CropPatch::default();
    for (key, value) in params {
        let Some(field) = FieldKey::from_name(key.as_ref()) else {
            continue;
        };
        let slot = match field {
            FieldKey::X1 => &mut patch.x1,
            FieldKey::Y1 => &mut patch.y1,
            FieldKey::X2 => &mut patch.x2,
            FieldKey::Y2 => &mut patch.y2,
        };
        if slot.is_none() {
            *slot = Some(parse_coordinate(value.as_ref()));
        }
    }
    patch.apply_to(crop)
}

/// Splits a query string (with or without the leading `?`) into decoded pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

pub fn encode_query<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key.as_ref()),
                encode_component(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// Unreserved characters pass through; everything else is escaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

fn encode_component(raw: &str) -> String {
    raw.split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}
