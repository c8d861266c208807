//! PDF header sniffing.
//!
//! Inputs are checked for the `%PDF-x.y` header before they are handed to
//! lopdf, so that a stray non-PDF file in the input directory fails fast
//! with [`Error::UnknownFormat`] instead of a parser error.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_LEN: usize = PDF_MAGIC.len() + 3; // "%PDF-1.7"

/// Read the header of `path` and return the declared PDF version.
pub fn sniff_pdf_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = [0u8; HEADER_LEN];
    File::open(path)?
        .read_exact(&mut header)
        .map_err(|_| Error::UnknownFormat)?;
    pdf_version_from_bytes(&header)
}

/// Return the PDF version declared by the leading bytes of a file.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = String::from_utf8_lossy(&data[PDF_MAGIC.len()..HEADER_LEN]).to_string();
    let bytes = version.as_bytes();
    if bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
    {
        Ok(version)
    } else {
        Err(Error::UnsupportedVersion(version))
    }
}
