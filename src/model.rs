use std::{fmt, str::FromStr};

use chrono::{Datelike, Month, NaiveDate};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize, Serializer};

pub type Price = f64;

/// Full record set of the most recent upload, in input row order.
pub type Dataset = Vec<Record>;

#[derive(Default, Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Company {
    #[default]
    Apple,
    Microsoft,
    Amazon,
    Google,
    Meta,
}

impl Company {
    pub const ALL: [Company; 5] = [
        Company::Apple,
        Company::Microsoft,
        Company::Amazon,
        Company::Google,
        Company::Meta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Company::Apple => "Apple",
            Company::Microsoft => "Microsoft",
            Company::Amazon => "Amazon",
            Company::Google => "Google",
            Company::Meta => "Meta",
        }
    }
}

impl FromStr for Company {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Company::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| eyre::eyre!("unknown company `{s}`"))
    }
}

/// Calendar date of a record. Rows whose date text could not be read keep
/// their place in the dataset as `Invalid`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TradeDate {
    Valid(NaiveDate),
    Invalid,
}

impl TradeDate {
    pub fn naive(&self) -> Option<NaiveDate> {
        match self {
            TradeDate::Valid(date) => Some(*date),
            TradeDate::Invalid => None,
        }
    }

    /// Never true for `Invalid`.
    pub fn in_month(&self, month: Month) -> bool {
        self.naive()
            .is_some_and(|date| date.month() == month.number_from_month())
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDate::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            TradeDate::Invalid => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for TradeDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One normalized daily observation. `difference` is always `open - close`,
/// so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    date: TradeDate,
    #[serde(skip)]
    company: String,
    open: Price,
    close: Price,
    difference: Price,
}

impl Record {
    pub fn new(date: TradeDate, company: impl Into<String>, open: Price, close: Price) -> Self {
        Self {
            date,
            company: company.into(),
            open,
            close,
            difference: open - close,
        }
    }

    pub fn date(&self) -> TradeDate {
        self.date
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn open(&self) -> Price {
        self.open
    }

    pub fn close(&self) -> Price {
        self.close
    }

    pub fn difference(&self) -> Price {
        self.difference
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}  Open: {:.2}  Close: {:.2}  Difference: {:.2}",
            self.date, self.open, self.close, self.difference
        )
    }
}

/// Records currently selected for the chart. Replaced wholesale on every
/// recomputation.
#[derive(Default, Debug, Clone, PartialEq, Deref, Serialize)]
#[serde(transparent)]
pub struct ActiveView(Vec<Record>);

impl ActiveView {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    pub fn into_inner(self) -> Vec<Record> {
        self.0
    }

    /// Chart payload: `[{date, open, close, difference}, ..]`,
    /// with non-numeric prices as `null`.
    pub fn to_chart_json(&self) -> eyre::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Month, NaiveDate};

    use super::{ActiveView, Company, Record, TradeDate};

    fn date(y: i32, m: u32, d: u32) -> TradeDate {
        TradeDate::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn unittest_company_names() -> eyre::Result<()> {
        for company in Company::ALL {
            assert_eq!(company.as_str().parse::<Company>()?, company);
            assert_eq!(company.to_string(), company.as_str());
        }

        assert!("apple".parse::<Company>().is_err());
        assert!("Netflix".parse::<Company>().is_err());

        Ok(())
    }

    #[test]
    fn unittest_difference_is_open_minus_close() {
        let r = Record::new(date(2024, 11, 5), "Apple", 100.0, 95.0);
        assert_eq!(r.difference(), 5.0);

        let r = Record::new(date(2024, 11, 5), "Apple", f64::NAN, 90.0);
        assert!(r.difference().is_nan());

        let r = Record::new(date(2024, 11, 5), "Apple", 90.0, f64::NAN);
        assert!(r.difference().is_nan());
    }

    #[test]
    fn unittest_invalid_date_never_in_month() {
        for month in (1..=12).map(|n| Month::try_from(n as u8).unwrap()) {
            assert!(!TradeDate::Invalid.in_month(month));
        }

        assert!(date(2024, 3, 15).in_month(Month::March));
        assert!(!date(2024, 3, 15).in_month(Month::April));
    }

    #[test]
    fn unittest_tooltip_format() {
        let r = Record::new(date(2024, 11, 5), "Apple", 100.0, 95.5);
        assert_eq!(
            r.to_string(),
            "Date: 2024-11-05  Open: 100.00  Close: 95.50  Difference: 4.50"
        );
    }

    #[test]
    fn unittest_chart_json() -> eyre::Result<()> {
        let view = ActiveView::new(vec![
            Record::new(date(2024, 11, 5), "Apple", 100.0, 95.0),
            Record::new(TradeDate::Invalid, "Apple", f64::NAN, 90.0),
        ]);

        let json: serde_json::Value = serde_json::from_str(&view.to_chart_json()?)?;
        assert_eq!(json[0]["date"], "2024-11-05");
        assert_eq!(json[0]["difference"], 5.0);
        assert_eq!(json[0].as_object().map(|o| o.len()), Some(4));
        assert!(json[0].get("company").is_none());
        assert_eq!(json[1]["date"], "Invalid Date");
        assert!(json[1]["open"].is_null());
        assert!(json[1]["difference"].is_null());
        assert_eq!(json[1]["close"], 90.0);

        Ok(())
    }
}
