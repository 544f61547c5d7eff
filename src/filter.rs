use chrono::Month;
use itertools::Itertools;

use crate::model::{ActiveView, Company, Record};

/// The two selector values that pick the active view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    pub company: Company,
    pub month: Month,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            company: Company::Apple,
            month: Month::November,
        }
    }
}

impl Selection {
    pub fn matches(&self, record: &Record) -> bool {
        record.company() == self.company.as_str() && record.date().in_month(self.month)
    }
}

/// Matching records in dataset order. Always a full rescan.
pub fn filter(dataset: &[Record], company: Company, month: Month) -> ActiveView {
    let selection = Selection { company, month };

    ActiveView::new(
        dataset
            .iter()
            .filter(|r| selection.matches(r))
            .cloned()
            .collect_vec(),
    )
}
