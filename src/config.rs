use std::{fs, path::Path};

use chrono::Month;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::model::Company;

/// Header names looked up in each row. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub company: String,
    pub open: String,
    pub close: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_owned(),
            company: "Company".to_owned(),
            open: "Open".to_owned(),
            close: "Close".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub columns: ColumnNames,
    pub delimiter: u8,
    pub trim: bool,
    pub default_company: Company,
    pub default_month: Month,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            delimiter: b',',
            trim: false,
            default_company: Company::Apple,
            default_month: Month::November,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;

        serde_json::from_str(&text).wrap_err_with(|| format!("parsing config {}", path.display()))
    }

    pub fn with_columns(mut self, value: ColumnNames) -> Self {
        self.columns = value;
        self
    }

    pub fn with_delimiter(mut self, value: u8) -> Self {
        self.delimiter = value;
        self
    }

    pub fn with_trim(mut self, value: bool) -> Self {
        self.trim = value;
        self
    }

    pub fn with_default_company(mut self, value: Company) -> Self {
        self.default_company = value;
        self
    }

    pub fn with_default_month(mut self, value: Month) -> Self {
        self.default_month = value;
        self
    }
}
