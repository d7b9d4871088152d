//! Intel HEX records for moving bitmaps over the console
//!
//! Only data (`00`) and end-of-file (`01`) records are understood, which is
//! all a 512 byte bitmap ever needs.

use std::fmt::Write as _;

use anyhow::{bail, ensure, Context, Result};

/// Data bytes per exported record
pub const RECORD_BYTES: usize = 32;

/// Record closing every export
pub const EOF_RECORD: &str = ":00000001FF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Data { address: u16, bytes: Vec<u8> },
    EndOfFile,
}

/// Two's complement of the byte sum
fn checksum<'a>(bytes: impl IntoIterator<Item = &'a u8>) -> u8 {
    bytes
        .into_iter()
        .fold(0u8, |sum, b| sum.wrapping_add(*b))
        .wrapping_neg()
}

/// Data records for `data`, `RECORD_BYTES` at a time, followed by the
/// end-of-file record
pub fn encode(data: &[u8]) -> Vec<String> {
    let mut records: Vec<String> = data
        .chunks(RECORD_BYTES)
        .enumerate()
        .map(|(i, chunk)| encode_data((i * RECORD_BYTES) as u16, chunk))
        .collect();
    records.push(EOF_RECORD.to_string());
    records
}

fn encode_data(address: u16, chunk: &[u8]) -> String {
    let [hi, lo] = address.to_be_bytes();
    let header = [chunk.len() as u8, hi, lo, 0x00];
    let mut line = String::with_capacity(11 + 2 * chunk.len());
    line.push(':');
    for b in header.iter().chain(chunk) {
        let _ = write!(line, "{:02X}", b);
    }
    let _ = write!(line, "{:02X}", checksum(header.iter().chain(chunk)));
    line
}

/// Parse one record, surrounding whitespace is ignored
pub fn decode(line: &str) -> Result<Record> {
    let line = line.trim();
    let Some(hex) = line.strip_prefix(':') else {
        bail!("record must start with ':'");
    };
    ensure!(
        hex.len() % 2 == 0 && hex.len() >= 10,
        "record is too short or has an odd number of digits"
    );

    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .with_context(|| format!("bad hex digits at column {}", i + 1))
        })
        .collect::<Result<Vec<u8>>>()?;

    let len = usize::from(bytes[0]);
    ensure!(
        bytes.len() == len + 5,
        "record declares {} data bytes but holds {}",
        len,
        bytes.len() - 5
    );
    ensure!(checksum(&bytes) == 0, "checksum mismatch");

    let address = u16::from_be_bytes([bytes[1], bytes[2]]);
    match bytes[3] {
        0x00 => Ok(Record::Data {
            address,
            bytes: bytes[4..4 + len].to_vec(),
        }),
        0x01 => Ok(Record::EndOfFile),
        kind => bail!("unsupported record type {:02X}", kind),
    }
}

/// Copy a data record into `target`, bytes past its end are dropped
///
/// Returns how many bytes landed.
pub fn apply(target: &mut [u8], address: u16, bytes: &[u8]) -> usize {
    let start = usize::from(address).min(target.len());
    let end = (start + bytes.len()).min(target.len());
    target[start..end].copy_from_slice(&bytes[..end - start]);
    end - start
}
