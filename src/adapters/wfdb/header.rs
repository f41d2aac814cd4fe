//! WFDB header parsing
//!
//! A header is plain text: optional `#` comment lines, one record line and
//! one line per signal. Field defaults follow the WFDB conventions (250 Hz
//! sampling, gain 200 adu/unit, millivolt units).

use crate::domain::DecodeError;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

const DEFAULT_FS: f64 = 250.0;
const DEFAULT_GAIN: f64 = 200.0;
const DEFAULT_UNITS: &str = "mV";

/// Parsed record line, comments and signal specifications
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    pub record_name: String,
    /// Segment count, present only for multi-segment records
    pub n_seg: Option<usize>,
    pub n_sig: usize,
    pub fs: f64,
    pub counter_freq: Option<f64>,
    pub base_counter: Option<f64>,
    pub sig_len: Option<usize>,
    pub base_time: Option<NaiveTime>,
    pub base_date: Option<NaiveDate>,
    pub comments: Vec<String>,
    pub signals: Vec<SignalSpec>,
}

/// One signal line
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSpec {
    pub file_name: String,
    pub format: u16,
    pub samples_per_frame: usize,
    pub skew: usize,
    pub byte_offset: usize,
    /// ADC gain in adu per physical unit, never zero
    pub adc_gain: f64,
    pub baseline: i64,
    pub units: String,
    pub adc_res: i64,
    pub adc_zero: i64,
    pub init_value: i64,
    pub checksum: i64,
    pub block_size: i64,
    pub description: String,
}

/// Header parser holding its compiled field patterns
#[derive(Debug, Clone)]
pub struct HeaderParser {
    frequency: Regex,
    format: Regex,
    gain: Regex,
}

impl HeaderParser {
    /// Compiles the field patterns
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            frequency: Regex::new(
                r"^([0-9.eE+-]+)(?:/([0-9.eE+-]+)(?:\(([0-9.eE+-]+)\))?)?$",
            )?,
            format: Regex::new(r"^(\d+)(?:x(\d+))?(?::(\d+))?(?:\+(\d+))?$")?,
            gain: Regex::new(r"^([0-9.eE+-]+)(?:\(([+-]?\d+)\))?(?:/(\S+))?$")?,
        })
    }

    /// Parses header text
    pub fn parse(&self, text: &str) -> Result<RecordHeader, DecodeError> {
        let mut comments = Vec::new();
        let mut lines = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                comments.push(comment.trim().to_string());
                continue;
            }
            lines.push((index + 1, line));
        }

        let Some(&(record_line_no, record_line)) = lines.first() else {
            return Err(invalid(1, "header has no record line"));
        };
        let mut header = self.parse_record_line(record_line_no, record_line)?;
        header.comments = comments;

        if header.n_seg.is_some() {
            return Ok(header);
        }

        let signal_lines = &lines[1..];
        if signal_lines.len() < header.n_sig {
            return Err(invalid(
                record_line_no,
                format!(
                    "record declares {} signals but header has {} signal lines",
                    header.n_sig,
                    signal_lines.len()
                ),
            ));
        }

        header.signals = signal_lines[..header.n_sig]
            .iter()
            .map(|&(line_no, line)| self.parse_signal_line(line_no, line))
            .collect::<Result<_, _>>()?;

        Ok(header)
    }

    fn parse_record_line(&self, line_no: usize, line: &str) -> Result<RecordHeader, DecodeError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(invalid(line_no, "record line needs a name and a signal count"));
        }

        let (record_name, n_seg) = match fields[0].split_once('/') {
            Some((name, seg)) => (name, Some(parse_num::<usize>(line_no, "segment count", seg)?)),
            None => (fields[0], None),
        };
        let n_sig = parse_num::<usize>(line_no, "signal count", fields[1])?;

        let (fs, counter_freq, base_counter) = match fields.get(2) {
            Some(spec) => {
                let caps = self
                    .frequency
                    .captures(spec)
                    .ok_or_else(|| invalid(line_no, format!("bad frequency field '{spec}'")))?;
                let fs = parse_num::<f64>(line_no, "sampling frequency", &caps[1])?;
                let counter_freq = caps
                    .get(2)
                    .map(|m| parse_num::<f64>(line_no, "counter frequency", m.as_str()))
                    .transpose()?;
                let base_counter = caps
                    .get(3)
                    .map(|m| parse_num::<f64>(line_no, "base counter", m.as_str()))
                    .transpose()?;
                (fs, counter_freq, base_counter)
            }
            None => (DEFAULT_FS, None, None),
        };

        let sig_len = fields
            .get(3)
            .map(|v| parse_num::<usize>(line_no, "signal length", v))
            .transpose()?;
        let base_time = fields
            .get(4)
            .map(|v| parse_time(line_no, v))
            .transpose()?;
        let base_date = fields
            .get(5)
            .map(|v| {
                NaiveDate::parse_from_str(v, "%d/%m/%Y")
                    .map_err(|e| invalid(line_no, format!("bad base date '{v}': {e}")))
            })
            .transpose()?;

        Ok(RecordHeader {
            record_name: record_name.to_string(),
            n_seg,
            n_sig,
            fs,
            counter_freq,
            base_counter,
            sig_len,
            base_time,
            base_date,
            comments: Vec::new(),
            signals: Vec::new(),
        })
    }

    fn parse_signal_line(&self, line_no: usize, line: &str) -> Result<SignalSpec, DecodeError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(invalid(line_no, "signal line needs a file name and a format"));
        }

        let caps = self
            .format
            .captures(fields[1])
            .ok_or_else(|| invalid(line_no, format!("bad format field '{}'", fields[1])))?;
        let format = parse_num::<u16>(line_no, "format", &caps[1])?;
        let samples_per_frame = caps
            .get(2)
            .map(|m| parse_num::<usize>(line_no, "samples per frame", m.as_str()))
            .transpose()?
            .unwrap_or(1)
            .max(1);
        let skew = caps
            .get(3)
            .map(|m| parse_num::<usize>(line_no, "skew", m.as_str()))
            .transpose()?
            .unwrap_or(0);
        let byte_offset = caps
            .get(4)
            .map(|m| parse_num::<usize>(line_no, "byte offset", m.as_str()))
            .transpose()?
            .unwrap_or(0);

        let adc_zero = optional_int(line_no, "ADC zero", fields.get(4))?.unwrap_or(0);

        let (adc_gain, baseline, units) = match fields.get(2) {
            Some(spec) => {
                let caps = self
                    .gain
                    .captures(spec)
                    .ok_or_else(|| invalid(line_no, format!("bad gain field '{spec}'")))?;
                let gain = parse_num::<f64>(line_no, "ADC gain", &caps[1])?;
                let baseline = caps
                    .get(2)
                    .map(|m| parse_num::<i64>(line_no, "baseline", m.as_str()))
                    .transpose()?
                    .unwrap_or(adc_zero);
                let units = caps
                    .get(3)
                    .map_or(DEFAULT_UNITS, |m| m.as_str())
                    .to_string();
                (gain, baseline, units)
            }
            None => (DEFAULT_GAIN, adc_zero, DEFAULT_UNITS.to_string()),
        };

        Ok(SignalSpec {
            file_name: fields[0].to_string(),
            format,
            samples_per_frame,
            skew,
            byte_offset,
            // gain 0 marks an uncalibrated signal
            adc_gain: if adc_gain == 0.0 { DEFAULT_GAIN } else { adc_gain },
            baseline,
            units,
            adc_res: optional_int(line_no, "ADC resolution", fields.get(3))?.unwrap_or(0),
            adc_zero,
            init_value: optional_int(line_no, "initial value", fields.get(5))?.unwrap_or(adc_zero),
            checksum: optional_int(line_no, "checksum", fields.get(6))?.unwrap_or(0),
            block_size: optional_int(line_no, "block size", fields.get(7))?.unwrap_or(0),
            description: fields.get(8..).map(|rest| rest.join(" ")).unwrap_or_default(),
        })
    }
}

fn invalid(line: usize, message: impl Into<String>) -> DecodeError {
    DecodeError::InvalidHeader {
        line,
        message: message.into(),
    }
}

fn parse_num<T: std::str::FromStr>(line: usize, what: &str, value: &str) -> Result<T, DecodeError> {
    value
        .parse()
        .map_err(|_| invalid(line, format!("bad {what} '{value}'")))
}

fn optional_int(line: usize, what: &str, value: Option<&&str>) -> Result<Option<i64>, DecodeError> {
    value.map(|v| parse_num::<i64>(line, what, v)).transpose()
}

/// Parses `HH:MM:SS[.fff]`, or `MM:SS[.fff]` with the hour left out
fn parse_time(line: usize, value: &str) -> Result<NaiveTime, DecodeError> {
    let full = match value.matches(':').count() {
        1 => format!("0:{value}"),
        _ => value.to_string(),
    };
    NaiveTime::parse_from_str(&full, "%H:%M:%S%.f")
        .map_err(|_| invalid(line, format!("bad base time '{value}'")))
}
