use std::io::{BufRead, Write};

use crate::error::Error;
use crate::signal::Signal;

fn parse_value(token: &str, line: usize) -> Result<f64, Error> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::unsupported(format!("line {line}: `{}` is not a number", token.trim())))
}

/// Flatten parsed rows, rejecting tables with several rows and several columns.
fn flatten(rows: Vec<Vec<f64>>) -> Result<Vec<f64>, Error> {
    let multi_row = rows.len() > 1;
    let multi_col = rows.iter().any(|row| row.len() > 1);
    if multi_row && multi_col {
        return Err(Error::unsupported(format!(
            "two-dimensional data ({} rows) is not a single signal",
            rows.len()
        )));
    }
    Ok(rows.into_iter().flatten().collect())
}

/// Read a CSV signal: the sample rate on the first line, samples after it.
pub fn read_csv<R: BufRead>(reader: R) -> Result<Signal, Error> {
    let mut lines = reader.lines().enumerate();
    let (_, header) = lines
        .next()
        .ok_or_else(|| Error::unsupported("empty CSV file"))?;
    let sample_rate = parse_value(&header?, 1)?;

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(|token| parse_value(token, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Signal::new(flatten(rows)?, sample_rate)
}

/// Parse whitespace separated samples recorded at `sample_rate`.
pub fn parse_text(text: &str, sample_rate: f64) -> Result<Signal, Error> {
    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.split_whitespace()
                .map(|token| parse_value(token, idx + 1))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Signal::new(flatten(rows)?, sample_rate)
}

/// Decode raw little-endian `f32` samples recorded at `sample_rate`.
pub fn decode_f32_le(bytes: &[u8], sample_rate: f64) -> Result<Signal, Error> {
    if bytes.len() % 4 != 0 {
        return Err(Error::unsupported(format!(
            "{} bytes is not a whole number of f32 samples",
            bytes.len()
        )));
    }
    let data = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
        .collect();
    Signal::new(data, sample_rate)
}

/// Write `signal` as CSV: the sample rate on line 1, the samples on line 2.
///
/// Values use the shortest representation that parses back to the same
/// `f64`, so [`read_csv`] restores the signal exactly.
pub fn write_csv<W: Write>(mut writer: W, signal: &Signal) -> Result<(), Error> {
    writeln!(writer, "{}", signal.sample_rate())?;
    let mut first = true;
    for v in signal.data() {
        if !first {
            writer.write_all(b",")?;
        }
        write!(writer, "{v}")?;
        first = false;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
