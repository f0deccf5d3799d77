use chrono::NaiveDateTime;
use std::path::Path;

use crate::dataset::{
    decode_chars, juld_to_datetime, parse_argo_date, require_argo_date, valid_f32, HistoryRecord,
    ProfileSource,
};
use crate::error::{DatasetError, Result};

/// An Argo profile file opened read-only.
pub struct NcProfile {
    file: netcdf::File,
}

impl NcProfile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = netcdf::open(path.as_ref())?;
        Ok(Self { file })
    }

    fn dim_len(&self, name: &str) -> Result<usize> {
        self.file
            .dimension(name)
            .map(|d| d.len())
            .ok_or_else(|| DatasetError::MissingDimension(name.to_string()))
    }

    fn var(&self, name: &str) -> Result<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| DatasetError::MissingVariable(name.to_string()))
    }

    /// Length of the trailing STRINGnn / DATE_TIME dimension of a char variable.
    fn string_len(var: &netcdf::Variable<'_>, name: &str) -> Result<usize> {
        var.dimensions()
            .last()
            .map(|d| d.len())
            .ok_or_else(|| DatasetError::MissingDimension(format!("{name} string length")))
    }

    /// Whole content of a scalar char variable such as DATE_CREATION.
    fn chars(&self, name: &str) -> Result<String> {
        let raw = self.var(name)?.get_raw_values(..)?;
        Ok(decode_chars(&raw))
    }

    /// HISTORY_* char variable, dimensioned (N_HISTORY, N_PROF, STRINGnn).
    fn history_chars(&self, name: &str, i_prof: usize, n_history: usize) -> Result<String> {
        let var = self.var(name)?;
        let width = Self::string_len(&var, name)?;
        let raw = var.get_raw_values((&[n_history, i_prof, 0], &[1, 1, width]))?;
        Ok(decode_chars(&raw))
    }

    /// HISTORY_* float variable, dimensioned (N_HISTORY, N_PROF).
    fn history_f32(&self, name: &str, i_prof: usize, n_history: usize) -> Result<Option<f32>> {
        let value = self.var(name)?.get_value::<f32, _>((n_history, i_prof))?;
        Ok(valid_f32(value))
    }
}

impl ProfileSource for NcProfile {
    fn n_prof(&self) -> Result<usize> {
        self.dim_len("N_PROF")
    }

    fn n_history(&self) -> Result<usize> {
        self.dim_len("N_HISTORY")
    }

    fn date_creation(&self) -> Result<NaiveDateTime> {
        require_argo_date("DATE_CREATION", &self.chars("DATE_CREATION")?)
    }

    fn date_update(&self) -> Result<NaiveDateTime> {
        require_argo_date("DATE_UPDATE", &self.chars("DATE_UPDATE")?)
    }

    fn juld(&self, i_prof: usize) -> Result<Option<NaiveDateTime>> {
        if i_prof >= self.n_prof()? {
            return Err(DatasetError::NoProfile { i_prof });
        }
        let juld = self.var("JULD")?.get_value::<f64, _>((i_prof,))?;
        Ok(juld_to_datetime(juld))
    }

    fn history(&self, i_prof: usize, n_history: usize) -> Result<HistoryRecord> {
        if i_prof >= self.n_prof()? {
            return Err(DatasetError::NoProfile { i_prof });
        }
        if n_history >= self.n_history()? {
            return Err(DatasetError::OutOfRange { i_prof, n_history });
        }
        let text = |name: &str| self.history_chars(name, i_prof, n_history);
        let float = |name: &str| self.history_f32(name, i_prof, n_history);

        Ok(HistoryRecord {
            institution: text("HISTORY_INSTITUTION")?,
            step: text("HISTORY_STEP")?,
            software: text("HISTORY_SOFTWARE")?,
            software_release: text("HISTORY_SOFTWARE_RELEASE")?,
            reference: text("HISTORY_REFERENCE")?,
            date: parse_argo_date("HISTORY_DATE", &text("HISTORY_DATE")?)?,
            action: text("HISTORY_ACTION")?,
            parameter: text("HISTORY_PARAMETER")?,
            start_pres: float("HISTORY_START_PRES")?,
            stop_pres: float("HISTORY_STOP_PRES")?,
            previous_value: float("HISTORY_PREVIOUS_VALUE")?,
            qctest: text("HISTORY_QCTEST")?,
        })
    }
}
