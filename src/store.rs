use crate::model::{Dataset, Record};

/// Holds the dataset of the latest upload. Every `replace` bumps the
/// generation, so a re-upload of identical rows still counts as new data.
#[derive(Default, Debug)]
pub struct DatasetStore {
    dataset: Dataset,
    generation: u64,
}

impl DatasetStore {
    pub fn replace(&mut self, records: Vec<Record>) -> u64 {
        self.dataset = records;
        self.generation += 1;
        self.generation
    }

    pub fn current(&self) -> &[Record] {
        &self.dataset
    }

    /// 0 until the first `replace`.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
