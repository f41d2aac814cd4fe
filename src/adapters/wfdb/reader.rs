//! Native WFDB record reader
//!
//! Reads a record's header, then every signal file it references. Signals
//! sharing a file are interleaved frame by frame in header order; each
//! frame holds `samples_per_frame` consecutive samples of every signal in
//! the file.

use super::header::{HeaderParser, RecordHeader, SignalSpec};
use super::signal::{decode_samples, invalid_sentinel};
use crate::adapters::reader::RecordReader;
use crate::config::{ReaderConfig, SignalMode};
use crate::domain::{DecodeError, DecodedRecord, NdArray, NdData, RecordId, WfdbJsonError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reader for single-segment WFDB records
#[derive(Debug, Clone)]
pub struct WfdbReader {
    parser: HeaderParser,
    header_extension: String,
    signal_mode: SignalMode,
    expand_frames: bool,
}

/// Digital samples of one signal, all frames expanded
struct Channel {
    samples: Vec<i64>,
    samples_per_frame: usize,
    sentinel: Option<i64>,
}

impl WfdbReader {
    /// Creates a reader for headers carrying `header_extension`
    pub fn new(config: &ReaderConfig, header_extension: &str) -> Result<Self, WfdbJsonError> {
        let parser = HeaderParser::new()
            .map_err(|e| WfdbJsonError::Other(format!("Invalid header pattern: {e}")))?;
        Ok(Self {
            parser,
            header_extension: header_extension.to_string(),
            signal_mode: config.signal_mode,
            expand_frames: config.expand_frames,
        })
    }

    fn read_header(&self, id: &RecordId) -> Result<RecordHeader, DecodeError> {
        let path = id.with_extension(&self.header_extension);
        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DecodeError::HeaderNotFound(path.clone()),
            _ => DecodeError::Io {
                path: path.clone(),
                message: e.to_string(),
            },
        })?;
        let header = self.parser.parse(&text)?;

        if header.n_seg.is_some() {
            return Err(DecodeError::Unsupported(
                "multi-segment records".to_string(),
            ));
        }
        Ok(header)
    }

    /// Reads every signal file and returns one channel per signal
    fn read_channels(
        &self,
        directory: &Path,
        header: &RecordHeader,
    ) -> Result<(usize, Vec<Channel>), DecodeError> {
        let groups = group_by_file(&header.signals);
        let mut decoded = Vec::with_capacity(groups.len());

        for (file_name, members) in &groups {
            let first = &header.signals[members[0]];
            if file_name == "~" {
                return Err(DecodeError::Unsupported(
                    "signals without a data file".to_string(),
                ));
            }
            for &index in members {
                let spec = &header.signals[index];
                if spec.format != first.format {
                    return Err(DecodeError::Unsupported(format!(
                        "mixed formats {} and {} in {file_name}",
                        first.format, spec.format
                    )));
                }
                if spec.skew != 0 {
                    return Err(DecodeError::Unsupported(format!(
                        "skewed signal '{}'",
                        spec.description
                    )));
                }
            }

            let path = directory.join(file_name);
            let bytes = fs::read(&path).map_err(|e| DecodeError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let payload = bytes.get(first.byte_offset..).unwrap_or_default();
            let samples = decode_samples(first.format, payload)?;
            let frame_len = members
                .iter()
                .try_fold(0usize, |len, &i| len.checked_add(header.signals[i].samples_per_frame))
                .ok_or_else(|| {
                    DecodeError::Unsupported(format!("frame size overflows in {file_name}"))
                })?;
            decoded.push((path, samples, frame_len));
        }

        let sig_len = match header.sig_len {
            Some(len) => len,
            None => decoded
                .iter()
                .map(|(_, samples, frame_len)| samples.len() / frame_len)
                .min()
                .unwrap_or(0),
        };

        let mut channels: Vec<Option<Channel>> = header.signals.iter().map(|_| None).collect();
        for ((_, members), (path, samples, frame_len)) in groups.iter().zip(decoded) {
            // Saturates for absurd header lengths, which then fail as truncated
            let expected = sig_len.saturating_mul(frame_len);
            if samples.len() < expected {
                return Err(DecodeError::Truncated {
                    path,
                    expected,
                    found: samples.len(),
                });
            }

            let mut start = 0;
            for &index in members {
                let spec = &header.signals[index];
                let spf = spec.samples_per_frame;
                // Bounded by samples.len() since spf <= frame_len
                let mut channel = Vec::with_capacity(sig_len * spf);
                for frame in samples[..expected].chunks_exact(frame_len) {
                    channel.extend_from_slice(&frame[start..start + spf]);
                }
                start += spf;
                channels[index] = Some(Channel {
                    samples: channel,
                    samples_per_frame: spf,
                    sentinel: invalid_sentinel(spec.format),
                });
            }
        }

        Ok((sig_len, channels.into_iter().flatten().collect()))
    }
}

impl RecordReader for WfdbReader {
    fn read(&self, id: &RecordId) -> Result<DecodedRecord, DecodeError> {
        let header = self.read_header(id)?;
        let (sig_len, channels) = self.read_channels(id.directory(), &header)?;
        let signals = &header.signals;

        let mut builder = DecodedRecord::builder()
            .record_name(header.record_name.as_str())
            .n_sig(header.n_sig)
            .fs(header.fs)
            .counter(header.counter_freq, header.base_counter)
            .sig_len(sig_len)
            .base_time(header.base_time)
            .base_date(header.base_date)
            .comments(header.comments.clone())
            .sig_name(signals.iter().map(|s| s.description.clone()).collect())
            .units(signals.iter().map(|s| s.units.clone()).collect())
            .signal_specs(
                signals.iter().map(|s| s.init_value).collect(),
                signals.iter().map(|s| s.checksum).collect(),
                signals.iter().map(|s| s.block_size).collect(),
            );

        if !channels.is_empty() {
            if self.expand_frames {
                if self.signal_mode.digital() {
                    builder = builder.e_d_signal(Some(
                        channels
                            .iter()
                            .map(|c| NdArray::from_ints(c.samples.clone()))
                            .collect(),
                    ));
                }
                if self.signal_mode.physical() {
                    builder = builder.e_p_signal(Some(
                        channels
                            .iter()
                            .zip(signals)
                            .map(|(c, spec)| {
                                NdArray::from_floats(
                                    c.samples.iter().map(|&d| physical(d, c, spec)).collect(),
                                )
                            })
                            .collect(),
                    ));
                }
            } else {
                let n_sig = channels.len();
                if self.signal_mode.digital() {
                    let data = smooth(sig_len, &channels, |frame, i| {
                        digital_mean(frame, &channels[i])
                    });
                    builder = builder.d_signal(Some(matrix(sig_len, n_sig, NdData::Int(data))?));
                }
                if self.signal_mode.physical() {
                    let data = smooth(sig_len, &channels, |frame, i| {
                        physical_mean(frame, &channels[i], &signals[i])
                    });
                    builder =
                        builder.p_signal(Some(matrix(sig_len, n_sig, NdData::Float(data))?));
                }
            }
        }

        builder.build().map_err(DecodeError::Unsupported)
    }
}

/// Signal indices per data file, files in order of first appearance
fn group_by_file(signals: &[SignalSpec]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (index, spec) in signals.iter().enumerate() {
        match groups.iter_mut().find(|(name, _)| *name == spec.file_name) {
            Some((_, members)) => members.push(index),
            None => groups.push((spec.file_name.clone(), vec![index])),
        }
    }
    groups
}

/// Row-major `[sig_len, n_sig]` data, one value per frame and channel
fn smooth<T, F>(sig_len: usize, channels: &[Channel], value: F) -> Vec<T>
where
    F: Fn(&[i64], usize) -> T,
{
    let mut data = Vec::with_capacity(sig_len * channels.len());
    for t in 0..sig_len {
        for (index, channel) in channels.iter().enumerate() {
            let spf = channel.samples_per_frame;
            data.push(value(&channel.samples[t * spf..(t + 1) * spf], index));
        }
    }
    data
}

fn matrix(sig_len: usize, n_sig: usize, data: NdData) -> Result<NdArray, DecodeError> {
    NdArray::new(vec![sig_len, n_sig], data).map_err(|e| DecodeError::Unsupported(e.to_string()))
}

fn is_invalid(sample: i64, channel: &Channel) -> bool {
    channel.sentinel == Some(sample)
}

fn physical(sample: i64, channel: &Channel, spec: &SignalSpec) -> f64 {
    if is_invalid(sample, channel) {
        f64::NAN
    } else {
        (sample - spec.baseline) as f64 / spec.adc_gain
    }
}

/// Frame average; any invalid sample invalidates the frame
fn digital_mean(frame: &[i64], channel: &Channel) -> i64 {
    if let Some(sentinel) = frame.iter().copied().find(|&s| is_invalid(s, channel)) {
        return sentinel;
    }
    let sum: i64 = frame.iter().sum();
    (sum as f64 / frame.len() as f64).round() as i64
}

fn physical_mean(frame: &[i64], channel: &Channel, spec: &SignalSpec) -> f64 {
    frame.iter().map(|&d| physical(d, channel, spec)).sum::<f64>() / frame.len() as f64
}
