use std::io::{BufRead, BufReader, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use gitviz_core::CommitId;

use crate::error::ObjectError;

pub const COMMIT_KIND: &str = "commit";

/// `<kind> <size>\0` never gets anywhere near this long.
const MAX_HEADER_LEN: u64 = 64;

/// Result of decoding one loose object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Body text of a commit object.
    Commit(String),
    /// Any other object kind (tree, blob, tag). Only the header was inflated.
    Other(String),
}

/// Inflate a loose object and classify it by the type token in its header.
///
/// Non-commit objects stop after the header, so large blobs are never fully
/// inflated. A commit body whose length disagrees with the declared size is
/// treated as corrupt.
pub fn decode_object(id: &CommitId, raw: &[u8]) -> Result<Decoded, ObjectError> {
    let mut reader = BufReader::new(ZlibDecoder::new(raw));

    let mut header = Vec::new();
    (&mut reader)
        .take(MAX_HEADER_LEN)
        .read_until(0, &mut header)
        .map_err(|e| ObjectError::decode(id, e.to_string()))?;
    if header.pop() != Some(0) {
        return Err(ObjectError::decode(id, "missing header terminator"));
    }
    let header = std::str::from_utf8(&header)
        .map_err(|_| ObjectError::decode(id, "header is not valid UTF-8"))?;

    let (kind, declared_size) = match header.split_once(' ') {
        Some((kind, size)) => (kind, Some(size)),
        None => (header, None),
    };
    if kind != COMMIT_KIND {
        return Ok(Decoded::Other(kind.to_string()));
    }

    let mut body = Vec::new();
    reader
        .read_to_end(&mut body)
        .map_err(|e| ObjectError::decode(id, e.to_string()))?;

    if let Some(size) = declared_size {
        let expected: usize = size
            .trim()
            .parse()
            .map_err(|_| ObjectError::decode(id, format!("invalid object size '{size}'")))?;
        if expected != body.len() {
            return Err(ObjectError::decode(
                id,
                format!("size mismatch: header says {expected}, body has {}", body.len()),
            ));
        }
    }

    Ok(Decoded::Commit(String::from_utf8_lossy(&body).into_owned()))
}

/// Build the on-disk bytes of a loose object: zlib(`<kind> <len>\0<body>`).
pub fn encode_object(kind: &str, body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    write!(encoder, "{kind} {}\0", body.len())?;
    encoder.write_all(body)?;
    encoder.finish()
}
