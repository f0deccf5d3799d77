use argo_core::reftable;
use chrono::NaiveDateTime;
use std::{collections::BTreeMap, convert::Infallible, io::Write};

use crate::error::Result;
use crate::record::IndexRecord;
use crate::traverse::{par_traverse, Jobs};

/// Profile counts of a loaded index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSummary {
    pub rows: usize,
    pub first_date: Option<NaiveDateTime>,
    pub last_date: Option<NaiveDateTime>,
    pub by_institution: BTreeMap<String, usize>,
    /// Keyed on the DAC directory of each profile file.
    pub by_dac: BTreeMap<String, usize>,
}

pub fn summarize(rows: &[IndexRecord], jobs: Jobs) -> Result<IndexSummary> {
    let keys = par_traverse(
        rows.iter().collect::<Vec<_>>(),
        |r: &IndexRecord| {
            let dac = r.dac().unwrap_or("-").to_string();
            Ok::<_, Infallible>((r.institution.clone(), dac, r.date))
        },
        jobs,
    )?;

    let mut summary = IndexSummary {
        rows: rows.len(),
        ..IndexSummary::default()
    };
    for (institution, dac, date) in keys {
        *summary.by_institution.entry(institution).or_default() += 1;
        *summary.by_dac.entry(dac).or_default() += 1;
        if let Some(d) = date {
            summary.first_date = Some(summary.first_date.map_or(d, |f| f.min(d)));
            summary.last_date = Some(summary.last_date.map_or(d, |l| l.max(d)));
        }
    }
    Ok(summary)
}

pub fn write_summary<W: Write>(out: &mut W, s: &IndexSummary) -> Result<()> {
    let date = |d: Option<NaiveDateTime>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    writeln!(out, "PROFILES: {}", s.rows)?;
    writeln!(out, "   DATES: {} to {}", date(s.first_date), date(s.last_date))?;
    for (code, count) in &s.by_institution {
        writeln!(
            out,
            "{:>8} {:<9} {:>8}  {}",
            code,
            reftable::data_centre(code).unwrap_or("-"),
            count,
            reftable::institution(code)
        )?;
    }
    writeln!(out, "    DACS:")?;
    for (dac, count) in &s.by_dac {
        writeln!(out, "{:>8} {:>18}", dac, count)?;
    }
    Ok(())
}
