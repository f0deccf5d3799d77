//! Human readable elapsed times, e.g. `+2 Days 3H05`.
//!
//! Months are 30 days and years are 12 of those months, so long deltas are
//! approximate. This matches the reports produced by the Argo history tools.

use chrono::Duration;

const MINUTE: i64 = 1;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
}

/// Largest unit first. Adding a unit only needs a new row here.
const UNITS: [(i64, Unit); 5] = [
    (YEAR, Unit::Years),
    (MONTH, Unit::Months),
    (DAY, Unit::Days),
    (HOUR, Unit::Hours),
    (MINUTE, Unit::Minutes),
];

/// A delta split into whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub negative: bool,
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Breakdown {
    fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Years => self.years,
            Unit::Months => self.months,
            Unit::Days => self.days,
            Unit::Hours => self.hours,
            Unit::Minutes => self.minutes,
        }
    }

    fn slot(&mut self, unit: Unit) -> &mut i64 {
        match unit {
            Unit::Years => &mut self.years,
            Unit::Months => &mut self.months,
            Unit::Days => &mut self.days,
            Unit::Hours => &mut self.hours,
            Unit::Minutes => &mut self.minutes,
        }
    }

    fn sign(&self) -> char {
        if self.negative { '-' } else { '+' }
    }
}

/// Greedy decomposition of `delta` over the unit table, truncated to minutes.
pub fn breakdown(delta: Duration) -> Breakdown {
    let total = delta.num_minutes();
    let mut out = Breakdown {
        negative: delta < Duration::zero(),
        ..Breakdown::default()
    };
    let mut rest = total.unsigned_abs();
    for (size, unit) in UNITS {
        let size = size as u64;
        *out.slot(unit) = (rest / size) as i64;
        rest %= size;
    }
    out
}

/// Format `delta` starting from its largest non-zero unit.
pub fn format_delta(delta: Duration) -> String {
    let b = breakdown(delta);
    let leading = UNITS
        .iter()
        .map(|&(_, unit)| unit)
        .find(|&unit| b.get(unit) != 0)
        .unwrap_or(Unit::Minutes);

    let mut out = String::new();
    out.push(b.sign());
    match leading {
        Unit::Minutes => {
            out.push_str(&format!("{} Mins", b.minutes));
            return out;
        }
        Unit::Years => out.push_str(&format!(
            "{} Years {} Months {} Days ",
            b.years, b.months, b.days
        )),
        Unit::Months => out.push_str(&format!("{} Months {} Days ", b.months, b.days)),
        Unit::Days => out.push_str(&format!("{} Days ", b.days)),
        Unit::Hours => {}
    }
    out.push_str(&format!("{}H{:02}", b.hours, b.minutes));
    out
}
