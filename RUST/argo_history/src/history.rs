//! HISTORY report of a profile file.

use argo_core::{format_delta, qctest, reftable};
use chrono::{Duration, NaiveDateTime};
use std::io::Write;

use crate::dataset::{HistoryRecord, ProfileSource};
use crate::error::Result;

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
const BLK: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// One line per history group.
    #[default]
    Compact,
    /// Every field of every history group.
    Detailed,
}

/// State of the HISTORY_QCTEST field of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QcTest {
    Absent,
    Decoded { hex: String, ids: Vec<u32> },
    Invalid { hex: String },
}

impl QcTest {
    pub fn from_field(hex: &str) -> Self {
        let hex = hex.trim();
        if hex.is_empty() {
            return QcTest::Absent;
        }
        match qctest::decode_hex(hex) {
            Ok(ids) => QcTest::Decoded { hex: hex.to_string(), ids },
            Err(err) => {
                tracing::warn!("{err}");
                QcTest::Invalid { hex: hex.to_string() }
            }
        }
    }

    /// No test to report: blank field or a zero mask.
    pub fn is_empty(&self) -> bool {
        match self {
            QcTest::Absent => true,
            QcTest::Decoded { ids, .. } => ids.is_empty(),
            QcTest::Invalid { .. } => false,
        }
    }
}

/// A history group with its derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub index: usize,
    pub record: HistoryRecord,
    pub since_creation: Option<Duration>,
    pub since_measurement: Option<Duration>,
    pub qctest: QcTest,
}

impl HistoryEntry {
    pub fn from_record(
        index: usize,
        record: HistoryRecord,
        created: NaiveDateTime,
        measured: Option<NaiveDateTime>,
    ) -> Self {
        let since_creation = record.date.map(|d| d - created);
        let since_measurement = record.date.zip(measured).map(|(d, m)| d - m);
        let qctest = QcTest::from_field(&record.qctest);
        Self {
            index,
            record,
            since_creation,
            since_measurement,
            qctest,
        }
    }

    /// Names of the fields left blank in this group.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let r = &self.record;
        let mut missing = Vec::new();
        if r.step.is_empty() {
            missing.push("STEP");
        }
        if r.action.is_empty() {
            missing.push("ACTION");
        }
        if self.qctest.is_empty() {
            missing.push("QCTEST");
        }
        if r.parameter.is_empty() {
            missing.push("PARAM");
        }
        if r.start_pres.is_none() {
            missing.push("START_PRES");
        }
        if r.previous_value.is_none() {
            missing.push("PREVIOUS_VALUE");
        }
        missing
    }
}

/// Header dates and history groups of one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileHistory {
    pub i_prof: usize,
    pub measured: Option<NaiveDateTime>,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub entries: Vec<HistoryEntry>,
}

impl ProfileHistory {
    pub fn read<S: ProfileSource + ?Sized>(source: &S, i_prof: usize) -> Result<Self> {
        let measured = source.juld(i_prof)?;
        let created = source.date_creation()?;
        let updated = source.date_update()?;
        let n_history = source.n_history()?;
        tracing::debug!(i_prof, n_history, "reading profile history");

        let entries = (0..n_history)
            .map(|nh| {
                let record = source.history(i_prof, nh)?;
                Ok(HistoryEntry::from_record(nh, record, created, measured))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            i_prof,
            measured,
            created,
            updated,
            entries,
        })
    }

    pub fn created_since_measurement(&self) -> Option<Duration> {
        self.measured.map(|m| self.created - m)
    }

    pub fn updated_since_creation(&self) -> Duration {
        self.updated - self.created
    }
}

fn stamp(d: Option<NaiveDateTime>) -> String {
    d.map(|d| d.format(TIMESTAMP).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn delta(d: Option<Duration>) -> String {
    d.map(format_delta).unwrap_or_else(|| "?".to_string())
}

fn field<W: Write>(out: &mut W, label: &str, text: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{BLK} {label:>12}: {text}")?;
    Ok(())
}

fn write_header<W: Write>(out: &mut W, h: &ProfileHistory) -> Result<()> {
    writeln!(out, "    PROFILE NUMBER: {}", h.i_prof)?;
    writeln!(out, "  MEASUREMENT DATE: {} ('JULD')", stamp(h.measured))?;
    writeln!(
        out,
        "FILE CREATION DATE: {}, {} since measurement ('DATE_CREATION')",
        stamp(Some(h.created)),
        delta(h.created_since_measurement())
    )?;
    writeln!(
        out,
        "  FILE UPDATE DATE: {}, {} since creation ('DATE_UPDATE')",
        stamp(Some(h.updated)),
        format_delta(h.updated_since_creation())
    )?;
    writeln!(out, "         HISTORY:")?;
    Ok(())
}

fn write_compact<W: Write>(out: &mut W, e: &HistoryEntry) -> Result<()> {
    writeln!(
        out,
        "{} | {:>19} | {}",
        e.index,
        stamp(e.record.date),
        reftable::history_step(&e.record.step)
    )?;
    Ok(())
}

fn write_detailed<W: Write>(out: &mut W, e: &HistoryEntry) -> Result<()> {
    let r = &e.record;
    writeln!(
        out,
        "{} | STEP: '{:>8}' > {}",
        e.index,
        r.step,
        reftable::history_step(&r.step)
    )?;
    field(
        out,
        "DATE",
        format!(
            "'{:>19}' > {} since creation, {} since measurement",
            stamp(r.date),
            delta(e.since_creation),
            delta(e.since_measurement)
        ),
    )?;
    field(
        out,
        "INSTITUTION",
        format!("'{}' > {}", r.institution, reftable::institution(&r.institution)),
    )?;
    if r.reference.is_empty() {
        field(out, "SOFTWARE", format!("'{}', release '{}'", r.software, r.software_release))?;
    } else {
        field(
            out,
            "SOFTWARE",
            format!(
                "'{}', release '{}', reference '{}'",
                r.software, r.software_release, r.reference
            ),
        )?;
    }
    if !r.action.is_empty() {
        field(out, "ACTION", format!("'{:>4}' > {}", r.action, reftable::action(&r.action)))?;
    }
    match &e.qctest {
        QcTest::Decoded { hex, ids } if !ids.is_empty() => {
            let ids = ids.iter().map(u32::to_string).collect::<Vec<_>>().join(", ");
            field(out, "QCTEST", format!("'{hex}' > {ids}"))?;
        }
        QcTest::Invalid { hex } => {
            field(
                out,
                "QCTEST",
                format!("<< Unexpected error when decoding QCTEST='{hex}' ! >>"),
            )?;
        }
        _ => {}
    }
    if !r.parameter.is_empty() {
        field(out, "PARAMETER", format!("'{}'", r.parameter))?;
    }
    if let Some(start) = r.start_pres {
        let stop = r
            .stop_pres
            .map(|p| format!("{p:.1}"))
            .unwrap_or_else(|| "-".to_string());
        field(out, "PRES", format!("From '{start:.1}' to '{stop}'"))?;
    }
    if let Some(previous) = r.previous_value {
        writeln!(out, "{BLK} {:>12}", "PREVIOUS")?;
        field(out, "VALUE", format!("'{previous:>4}'"))?;
    }
    let missing = e.missing_fields();
    if !missing.is_empty() {
        field(out, "Missing", missing.join(", "))?;
    }
    Ok(())
}

/// Render one profile.
pub fn write_report<W: Write>(out: &mut W, h: &ProfileHistory, verbosity: Verbosity) -> Result<()> {
    write_header(out, h)?;
    for e in &h.entries {
        match verbosity {
            Verbosity::Compact => write_compact(out, e)?,
            Verbosity::Detailed => write_detailed(out, e)?,
        }
    }
    Ok(())
}

/// Render every profile of `source`, each followed by a blank line.
pub fn write_dataset_report<W, S>(out: &mut W, source: &S, verbosity: Verbosity) -> Result<usize>
where
    W: Write,
    S: ProfileSource + ?Sized,
{
    let n_prof = source.n_prof()?;
    for i_prof in 0..n_prof {
        let h = ProfileHistory::read(source, i_prof)?;
        write_report(out, &h, verbosity)?;
        writeln!(out)?;
    }
    Ok(n_prof)
}
