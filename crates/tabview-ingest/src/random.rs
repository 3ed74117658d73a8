//! Random sample objects for trying out the viewer.
//!
//! Every generator takes the RNG explicitly, so a seeded `StdRng` gives the
//! same samples on every run.

use chrono::NaiveDate;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tabview_model::{Cube, Key, ModelError, Series, Table, Value, Workspace};

/// Shape of the generated samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOptions {
    /// First day of the daily axis.
    pub start: NaiveDate,
    /// Last day of the daily axis, inclusive.
    pub end: NaiveDate,
    pub columns: usize,
    pub majors: usize,
    pub minors: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2015, 9, 30).unwrap_or_default(),
            columns: 2,
            majors: 3,
            minors: 2,
        }
    }
}

impl SampleOptions {
    /// One timestamp key per day from `start` to `end`.
    pub fn daily_axis(&self) -> Vec<Key> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .filter_map(|day| day.and_hms_opt(0, 0, 0))
            .map(Key::Timestamp)
            .collect()
    }
}

fn uniform(rng: &mut impl Rng, len: usize) -> Vec<Option<f64>> {
    (0..len).map(|_| Some(rng.r#gen::<f64>())).collect()
}

pub fn random_series(rng: &mut impl Rng, options: &SampleOptions) -> Result<Series, ModelError> {
    let index = options.daily_axis();
    let values = uniform(rng, index.len());
    Series::new(index, values)
}

/// Columns are named `0`, `1`, ...
pub fn random_table(rng: &mut impl Rng, options: &SampleOptions) -> Result<Table, ModelError> {
    let index = options.daily_axis();
    let columns = (0..options.columns)
        .map(|col| (col.to_string(), uniform(rng, index.len())))
        .collect();
    Table::new(index, columns)
}

/// Majors are labelled `major0`, `major1`, ... and minors `minor0`, ...
pub fn random_cube(rng: &mut impl Rng, options: &SampleOptions) -> Result<Cube, ModelError> {
    let index = options.daily_axis();
    let majors = (0..options.majors).map(|i| format!("major{i}")).collect();
    let minors = (0..options.minors).map(|i| format!("minor{i}")).collect();
    let cells = (0..options.majors * options.minors)
        .map(|_| uniform(rng, index.len()))
        .collect();
    Cube::from_dense(index, majors, minors, cells)
}

/// The standard sample set `ts`, `df` and `pl` from a fixed seed.
pub fn sample_workspace(seed: u64, options: &SampleOptions) -> Result<Workspace, ModelError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut workspace = Workspace::new();
    workspace.put("ts", Value::from(random_series(&mut rng, options)?));
    workspace.put("df", Value::Table(random_table(&mut rng, options)?));
    workspace.put("pl", Value::Cube(random_cube(&mut rng, options)?));
    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axis_covers_september() {
        let axis = SampleOptions::default().daily_axis();
        assert_eq!(axis.len(), 30);
        assert_eq!(axis[0].to_string(), "2015-09-01");
        assert_eq!(axis[29].to_string(), "2015-09-30");
    }

    #[test]
    fn test_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = SampleOptions::default();

        let table = random_table(&mut rng, &options).unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 30);

        let cube = random_cube(&mut rng, &options).unwrap();
        assert_eq!(cube.len(), 3);
        assert_eq!(cube.cell_count(), 6);
        assert!(cube.cell("major2", "minor1").is_some());
    }

    #[test]
    fn test_seed_is_reproducible() {
        let options = SampleOptions::default();
        let first = sample_workspace(42, &options).unwrap();
        let second = sample_workspace(42, &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.names().collect::<Vec<_>>(), vec!["df", "pl", "ts"]);
    }
}
