//! On-disk run cache.
//!
//! Layout: `<root>/<run_id>/manifest.json` plus `<root>/<run_id>/timeseries.jsonl`
//! with one [`TimeseriesRecord`] per line. A run exists once its manifest does;
//! the manifest is written last so a crashed save never looks complete.
//! Every method taking a run id rejects anything but a lowercase SHA-256 hex
//! digest with [`ResultsError::InvalidRunId`].

use crate::hash::is_valid_run_id;
use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TIMESERIES_FILE: &str = "timeseries.jsonl";
const STORE_DIR: [&str; 2] = [".piloop", "runs"];

#[derive(Debug, Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    /// Open (creating if needed) a store rooted at `root_dir`.
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store rooted at `<scenario dir>/.piloop/runs`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: format!("{} has no parent directory", scenario_path.display()),
            })?;
        Self::new(STORE_DIR.iter().fold(scenario_dir.to_path_buf(), |p, d| p.join(d)))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Directory of a run. Ids are checked first so none can leave `root_dir`.
    fn run_dir(&self, run_id: &str) -> ResultsResult<PathBuf> {
        if !is_valid_run_id(run_id) {
            return Err(ResultsError::InvalidRunId {
                run_id: run_id.to_string(),
            });
        }
        Ok(self.root_dir.join(run_id))
    }

    fn file(&self, run_id: &str, name: &str) -> ResultsResult<PathBuf> {
        Ok(self.run_dir(run_id)?.join(name))
    }

    fn existing_file(&self, run_id: &str, name: &str) -> ResultsResult<PathBuf> {
        let path = self.file(run_id, name)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            })
        }
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.file(run_id, MANIFEST_FILE)
            .is_ok_and(|path| path.is_file())
    }

    /// Write a run, replacing any previous run with the same id.
    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
    ) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id)?;
        fs::create_dir_all(&run_dir)?;

        let mut out = BufWriter::new(File::create(run_dir.join(TIMESERIES_FILE))?);
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        fs::write(
            run_dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(manifest)?,
        )?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let path = self.existing_file(run_id, MANIFEST_FILE)?;
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        let path = self.existing_file(run_id, TIMESERIES_FILE)?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(File::open(path)?).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| ResultsError::BadRecord {
                run_id: run_id.to_string(),
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// All readable runs, oldest first by manifest timestamp.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        if !self.root_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            // Half-written or foreign directories are skipped
            if let Ok(manifest) = self.load_manifest(&entry.file_name().to_string_lossy()) {
                runs.push(manifest);
            }
        }

        runs.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });
        Ok(runs)
    }

    /// Remove a run; returns whether anything was deleted.
    pub fn delete_run(&self, run_id: &str) -> ResultsResult<bool> {
        let run_dir = self.run_dir(run_id)?;
        if !run_dir.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(run_dir)?;
        Ok(true)
    }
}
