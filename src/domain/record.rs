//! Decoded record domain model
//!
//! A [`DecodedRecord`] is what a record reader produces for one record
//! identifier: header metadata, per-signal descriptive arrays and up to four
//! sample arrays. It is built once per conversion and never mutated.

use super::array::NdArray;
use chrono::{NaiveDate, NaiveTime};

/// Fully decoded physiological record
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    /// Record name as written in the header
    pub record_name: String,

    /// Number of signals
    pub n_sig: usize,

    /// Sampling frequency in Hz
    pub fs: f64,

    /// Counter frequency in Hz
    pub counter_freq: Option<f64>,

    /// Counter value of sample 0
    pub base_counter: Option<f64>,

    /// Number of samples per signal
    pub sig_len: usize,

    /// Time of day of sample 0
    pub base_time: Option<NaiveTime>,

    /// Date of sample 0
    pub base_date: Option<NaiveDate>,

    /// Free-text header comments, in file order
    pub comments: Vec<String>,

    /// Signal descriptions
    pub sig_name: Vec<String>,

    /// Physical units per signal
    pub units: Vec<String>,

    /// Initial digital value per signal
    pub init_value: Vec<i64>,

    /// Header checksum per signal
    pub checksum: Vec<i64>,

    /// Block size per signal
    pub block_size: Vec<i64>,

    /// Digital samples, shape `[sig_len, n_sig]`
    pub d_signal: Option<NdArray>,

    /// Expanded digital samples, one 1-D array per signal
    pub e_d_signal: Option<Vec<NdArray>>,

    /// Physical samples, shape `[sig_len, n_sig]`
    pub p_signal: Option<NdArray>,

    /// Expanded physical samples, one 1-D array per signal
    pub e_p_signal: Option<Vec<NdArray>>,
}

impl DecodedRecord {
    /// Creates a new builder for constructing a DecodedRecord
    pub fn builder() -> DecodedRecordBuilder {
        DecodedRecordBuilder::default()
    }
}

/// Builder for constructing DecodedRecord instances
#[derive(Debug, Default)]
pub struct DecodedRecordBuilder {
    record_name: Option<String>,
    n_sig: Option<usize>,
    fs: Option<f64>,
    counter_freq: Option<f64>,
    base_counter: Option<f64>,
    sig_len: Option<usize>,
    base_time: Option<NaiveTime>,
    base_date: Option<NaiveDate>,
    comments: Vec<String>,
    sig_name: Vec<String>,
    units: Vec<String>,
    init_value: Vec<i64>,
    checksum: Vec<i64>,
    block_size: Vec<i64>,
    d_signal: Option<NdArray>,
    e_d_signal: Option<Vec<NdArray>>,
    p_signal: Option<NdArray>,
    e_p_signal: Option<Vec<NdArray>>,
}

impl DecodedRecordBuilder {
    /// Creates a new DecodedRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the record name
    pub fn record_name(mut self, name: impl Into<String>) -> Self {
        self.record_name = Some(name.into());
        self
    }

    /// Sets the number of signals
    pub fn n_sig(mut self, n_sig: usize) -> Self {
        self.n_sig = Some(n_sig);
        self
    }

    /// Sets the sampling frequency
    pub fn fs(mut self, fs: f64) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Sets the counter frequency and base counter value
    pub fn counter(mut self, counter_freq: Option<f64>, base_counter: Option<f64>) -> Self {
        self.counter_freq = counter_freq;
        self.base_counter = base_counter;
        self
    }

    /// Sets the signal length
    pub fn sig_len(mut self, sig_len: usize) -> Self {
        self.sig_len = Some(sig_len);
        self
    }

    /// Sets the base time
    pub fn base_time(mut self, base_time: Option<NaiveTime>) -> Self {
        self.base_time = base_time;
        self
    }

    /// Sets the base date
    pub fn base_date(mut self, base_date: Option<NaiveDate>) -> Self {
        self.base_date = base_date;
        self
    }

    /// Sets the header comments
    pub fn comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    /// Sets the signal names
    pub fn sig_name(mut self, sig_name: Vec<String>) -> Self {
        self.sig_name = sig_name;
        self
    }

    /// Sets the units
    pub fn units(mut self, units: Vec<String>) -> Self {
        self.units = units;
        self
    }

    /// Sets initial values, checksums and block sizes
    pub fn signal_specs(
        mut self,
        init_value: Vec<i64>,
        checksum: Vec<i64>,
        block_size: Vec<i64>,
    ) -> Self {
        self.init_value = init_value;
        self.checksum = checksum;
        self.block_size = block_size;
        self
    }

    /// Sets the digital samples
    pub fn d_signal(mut self, d_signal: Option<NdArray>) -> Self {
        self.d_signal = d_signal;
        self
    }

    /// Sets the expanded digital samples
    pub fn e_d_signal(mut self, e_d_signal: Option<Vec<NdArray>>) -> Self {
        self.e_d_signal = e_d_signal;
        self
    }

    /// Sets the physical samples
    pub fn p_signal(mut self, p_signal: Option<NdArray>) -> Self {
        self.p_signal = p_signal;
        self
    }

    /// Sets the expanded physical samples
    pub fn e_p_signal(mut self, e_p_signal: Option<Vec<NdArray>>) -> Self {
        self.e_p_signal = e_p_signal;
        self
    }

    /// Builds the DecodedRecord
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or a smoothed signal
    /// matrix is not shaped `[sig_len, n_sig]`
    pub fn build(self) -> Result<DecodedRecord, String> {
        let record_name = self.record_name.ok_or("record_name is required")?;
        let n_sig = self.n_sig.ok_or("n_sig is required")?;
        let fs = self.fs.ok_or("fs is required")?;
        let sig_len = self.sig_len.ok_or("sig_len is required")?;

        for (field, matrix) in [("d_signal", &self.d_signal), ("p_signal", &self.p_signal)] {
            if let Some(matrix) = matrix {
                if matrix.shape() != [sig_len, n_sig] {
                    return Err(format!(
                        "{field} has shape {:?}, expected [{sig_len}, {n_sig}]",
                        matrix.shape()
                    ));
                }
            }
        }

        Ok(DecodedRecord {
            record_name,
            n_sig,
            fs,
            counter_freq: self.counter_freq,
            base_counter: self.base_counter,
            sig_len,
            base_time: self.base_time,
            base_date: self.base_date,
            comments: self.comments,
            sig_name: self.sig_name,
            units: self.units,
            init_value: self.init_value,
            checksum: self.checksum,
            block_size: self.block_size,
            d_signal: self.d_signal,
            e_d_signal: self.e_d_signal,
            p_signal: self.p_signal,
            e_p_signal: self.e_p_signal,
        })
    }
}
