//! One row of `argo_profile_detailled_index.txt`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column layout of the detailed profile index. Dates are `YYYYMMDDHHMISS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub file: String,
    #[serde(with = "compact_date")]
    pub date: Option<NaiveDateTime>,
    pub latitude: Option<f32>,
    pub longitude: Option<f32>,
    pub ocean: String,
    pub profiler_type: String,
    pub institution: String,
    #[serde(with = "compact_date")]
    pub date_update: Option<NaiveDateTime>,
    pub profile_temp_qc: String,
    pub profile_psal_qc: String,
    pub profile_doxy_qc: String,
    pub ad_psal_adjustment_mean: Option<f32>,
    pub ad_psal_adjustment_deviation: Option<f32>,
    #[serde(with = "compact_date")]
    pub gdac_date_creation: Option<NaiveDateTime>,
    #[serde(with = "compact_date")]
    pub gdac_date_update: Option<NaiveDateTime>,
    pub n_levels: Option<u32>,
}

impl IndexRecord {
    /// DAC directory the profile file lives in, e.g. `aoml`.
    pub fn dac(&self) -> Option<&str> {
        self.file.split('/').next().filter(|s| !s.is_empty())
    }
}

/// Same text layout in the index and in the cache, so both read back alike.
mod compact_date {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y%m%d%H%M%S";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}
