//! Read access to the parts of an Argo profile file the history report needs.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{DatasetError, Result};

/// Argo `DATE_TIME` layout, e.g. `20170405134512`.
pub const DATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Fill value of the float HISTORY variables.
pub const FILL_F32: f32 = 99_999.0;

/// Fill value of JULD.
pub const FILL_JULD: f64 = 999_999.0;

/// One HISTORY group of one profile, strings already trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryRecord {
    pub institution: String,
    pub step: String,
    pub software: String,
    pub software_release: String,
    pub reference: String,
    pub date: Option<NaiveDateTime>,
    pub action: String,
    pub parameter: String,
    pub start_pres: Option<f32>,
    pub stop_pres: Option<f32>,
    pub previous_value: Option<f32>,
    pub qctest: String,
}

/// A profile dataset: N_PROF casts sharing N_HISTORY history slots.
pub trait ProfileSource {
    fn n_prof(&self) -> Result<usize>;
    fn n_history(&self) -> Result<usize>;
    fn date_creation(&self) -> Result<NaiveDateTime>;
    fn date_update(&self) -> Result<NaiveDateTime>;
    /// Measurement date, `None` when JULD holds its fill value.
    fn juld(&self, i_prof: usize) -> Result<Option<NaiveDateTime>>;
    fn history(&self, i_prof: usize, n_history: usize) -> Result<HistoryRecord>;
}

/// Parse a `YYYYMMDDHHMISS` field. Blank fields are `None`.
pub fn parse_argo_date(field: &str, value: &str) -> Result<Option<NaiveDateTime>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DatasetError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Same as [`parse_argo_date`] for fields that must be set.
pub fn require_argo_date(field: &str, value: &str) -> Result<NaiveDateTime> {
    parse_argo_date(field, value)?.ok_or_else(|| DatasetError::InvalidDate {
        field: field.to_string(),
        value: String::new(),
    })
}

/// JULD is expressed in days since 1950-01-01 00:00:00 UTC.
pub fn juld_to_datetime(juld: f64) -> Option<NaiveDateTime> {
    if !juld.is_finite() || juld.abs() >= FILL_JULD {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1950, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let millis = (juld * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
}

/// Map fill values and NaN to `None`.
pub fn valid_f32(v: f32) -> Option<f32> {
    (v.is_finite() && v < FILL_F32).then_some(v)
}

/// Decode a NetCDF char array: stop at the first NUL, trim blanks.
pub fn decode_chars(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim().to_string()
}

/// Profile held in memory, indexed `[i_prof][n_history]`.
#[derive(Debug, Clone)]
pub struct MemoryProfile {
    pub date_creation: NaiveDateTime,
    pub date_update: NaiveDateTime,
    pub juld: Vec<Option<NaiveDateTime>>,
    pub history: Vec<Vec<HistoryRecord>>,
}

impl MemoryProfile {
    pub fn new(date_creation: NaiveDateTime, date_update: NaiveDateTime) -> Self {
        Self {
            date_creation,
            date_update,
            juld: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Append a profile measured at `juld` with its history groups.
    pub fn with_profile(mut self, juld: Option<NaiveDateTime>, history: Vec<HistoryRecord>) -> Self {
        self.juld.push(juld);
        self.history.push(history);
        self
    }
}

impl ProfileSource for MemoryProfile {
    fn n_prof(&self) -> Result<usize> {
        Ok(self.juld.len())
    }

    fn n_history(&self) -> Result<usize> {
        Ok(self.history.iter().map(Vec::len).max().unwrap_or(0))
    }

    fn date_creation(&self) -> Result<NaiveDateTime> {
        Ok(self.date_creation)
    }

    fn date_update(&self) -> Result<NaiveDateTime> {
        Ok(self.date_update)
    }

    fn juld(&self, i_prof: usize) -> Result<Option<NaiveDateTime>> {
        self.juld
            .get(i_prof)
            .copied()
            .ok_or(DatasetError::NoProfile { i_prof })
    }

    /// Profiles with fewer groups than N_HISTORY read back empty records,
    /// like unfilled slots in a file.
    fn history(&self, i_prof: usize, n_history: usize) -> Result<HistoryRecord> {
        let groups = self
            .history
            .get(i_prof)
            .ok_or(DatasetError::NoProfile { i_prof })?;
        if n_history >= self.n_history()? {
            return Err(DatasetError::OutOfRange { i_prof, n_history });
        }
        Ok(groups.get(n_history).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn juld_epoch_and_fill() {
        let d = juld_to_datetime(0.5).unwrap();
        assert_eq!(d.to_string(), "1950-01-01 12:00:00");
        assert!(juld_to_datetime(FILL_JULD).is_none());
        assert!(juld_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn juld_out_of_range_is_none() {
        assert!(juld_to_datetime(-1.0e12).is_none());
        assert!(juld_to_datetime(-FILL_JULD).is_none());
        assert!(juld_to_datetime(f64::NEG_INFINITY).is_none());
        assert_eq!(juld_to_datetime(-365.0).unwrap().to_string(), "1949-01-01 00:00:00");
    }

    #[test]
    fn chars_stop_at_nul() {
        assert_eq!(decode_chars(b"ARGQ\0\0\0"), "ARGQ");
        assert_eq!(decode_chars(b"  IF    "), "IF");
        assert_eq!(decode_chars(b""), "");
    }

    #[test]
    fn argo_dates() {
        let d = parse_argo_date("HISTORY_DATE", "20170405134512").unwrap().unwrap();
        assert_eq!(d.to_string(), "2017-04-05 13:45:12");
        assert!(parse_argo_date("HISTORY_DATE", "              ").unwrap().is_none());
        assert!(matches!(
            parse_argo_date("HISTORY_DATE", "2017"),
            Err(DatasetError::InvalidDate { .. })
        ));
        assert!(require_argo_date("DATE_CREATION", "").is_err());
    }

    #[test]
    fn fill_floats() {
        assert_eq!(valid_f32(12.5), Some(12.5));
        assert_eq!(valid_f32(FILL_F32), None);
        assert_eq!(valid_f32(f32::NAN), None);
    }
}
