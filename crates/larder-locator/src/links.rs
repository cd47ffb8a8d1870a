//! Map links for a chosen charity.

use larder_core::Coordinate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_MAP_ZOOM: u8 = 15;

/// Google Maps directions to a free-text destination.
#[must_use]
pub fn directions_url(destination: &str) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={}",
        utf8_percent_encode(destination, URI_COMPONENT)
    )
}

/// Embeddable map view centred on `center`.
#[must_use]
pub fn map_embed_url(api_key: &str, center: Coordinate, zoom: u8) -> String {
    format!(
        "https://www.google.com/maps/embed/v1/view?key={}&center={},{}&zoom={zoom}",
        utf8_percent_encode(api_key, URI_COMPONENT),
        center.lat,
        center.lng
    )
}
