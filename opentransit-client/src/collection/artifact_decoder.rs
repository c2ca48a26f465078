use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::io::Read;

use super::CollectionError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// decodes a JSON artifact body. `.json.gz` objects are served without a
/// `Content-Encoding` header, so gzip is detected from the magic bytes.
pub fn decode_artifact<T: DeserializeOwned>(location: &str, body: &[u8]) -> Result<T, CollectionError> {
    let json = inflate_artifact(location, body)?;
    deserialize(location, &json)
}

/// the JSON text of an artifact body, inflated when it is gzipped
pub fn inflate_artifact<'a>(location: &str, body: &'a [u8]) -> Result<Cow<'a, [u8]>, CollectionError> {
    if !body.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(body));
    }
    let mut json = Vec::new();
    GzDecoder::new(body)
        .read_to_end(&mut json)
        .map_err(|source| CollectionError::DecompressError {
            location: location.to_string(),
            source,
        })?;
    Ok(Cow::Owned(json))
}

fn deserialize<T: DeserializeOwned>(location: &str, json: &[u8]) -> Result<T, CollectionError> {
    serde_json::from_slice(json).map_err(|source| CollectionError::DeserializeError {
        location: location.to_string(),
        source,
    })
}
