//! Record Store: the applications table plus the resume files it references.
//!
//! The table lives in `<data_dir>/applications.csv` and is rewritten wholesale
//! on every append. Resumes live in `<data_dir>/resumes/`, one file per
//! company. Nothing here locks the files: callers must guarantee a single
//! writer (see `AppState`).

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::application::{resume_file_name, ApplicationRecord, COLUMNS};

pub const TABLE_FILE: &str = "applications.csv";
pub const RESUME_DIR: &str = "resumes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed applications table {}: {source}", path.display())]
    Format { path: PathBuf, source: csv::Error },

    #[error(
        "Unexpected columns in {}: expected [{}], found [{}]",
        path.display(),
        COLUMNS.join(", "),
        found.join(", ")
    )]
    Columns { path: PathBuf, found: Vec<String> },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// File-backed application table with its resume folder.
#[derive(Debug)]
pub struct RecordStore {
    table_path: PathBuf,
    resume_dir: PathBuf,
    applicant_name: String,
    records: Vec<ApplicationRecord>,
}

impl RecordStore {
    /// Opens the store rooted at `data_dir`, creating the resume folder and
    /// loading any existing table.
    pub fn open(data_dir: &Path, applicant_name: &str) -> Result<Self, StoreError> {
        let resume_dir = data_dir.join(RESUME_DIR);
        fs::create_dir_all(&resume_dir).map_err(io_error(&resume_dir))?;

        let table_path = data_dir.join(TABLE_FILE);
        let records = load(&table_path)?;
        info!(
            "Loaded {} application(s) from {}",
            records.len(),
            table_path.display()
        );

        Ok(RecordStore {
            table_path,
            resume_dir,
            applicant_name: applicant_name.to_string(),
            records,
        })
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    pub fn resume_dir(&self) -> &Path {
        &self.resume_dir
    }

    pub fn resume_path(&self, file_name: &str) -> PathBuf {
        self.resume_dir.join(file_name)
    }

    /// Filename the resume for `company` is stored under.
    pub fn resume_file_name(&self, company: &str) -> String {
        resume_file_name(&self.applicant_name, company)
    }

    /// Appends `record` and rewrites the whole table from memory.
    ///
    /// The in-memory table only grows once the rewrite has landed on disk.
    pub fn append_and_persist(&mut self, record: ApplicationRecord) -> Result<(), StoreError> {
        self.records.push(record);
        if let Err(e) = write_table(&self.table_path, &self.records) {
            self.records.pop();
            return Err(e);
        }
        info!(
            "Persisted {} application(s) to {}",
            self.records.len(),
            self.table_path.display()
        );
        Ok(())
    }

    /// Writes the resume for `company`, overwriting any earlier file with the
    /// same name. Returns the generated filename.
    pub fn save_resume_file(&self, company: &str, bytes: &[u8]) -> Result<String, StoreError> {
        fs::create_dir_all(&self.resume_dir).map_err(io_error(&self.resume_dir))?;

        let file_name = self.resume_file_name(company);
        let path = self.resume_path(&file_name);
        fs::write(&path, bytes).map_err(io_error(&path))?;

        info!("Saved resume {} ({} bytes)", path.display(), bytes.len());
        Ok(file_name)
    }
}

/// Reads the table at `path`. A missing file is an empty table.
pub fn load(path: &Path) -> Result<Vec<ApplicationRecord>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path)(e)),
    };

    let format_error = |source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers().map_err(format_error)?;
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(StoreError::Columns {
            path: path.to_path_buf(),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    reader
        .deserialize::<ApplicationRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(format_error)
}

/// Replaces the table at `path` with `records`, header row first.
///
/// Written to a sibling temp file and renamed into place, so a failed write
/// leaves the previous table intact.
fn write_table(path: &Path, records: &[ApplicationRecord]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        let to_io = |e: csv::Error| io_error(path)(io::Error::from(e));
        writer.write_record(COLUMNS).map_err(to_io)?;
        for record in records {
            writer.serialize(record).map_err(to_io)?;
        }
        writer.flush().map_err(io_error(path))?;
    }
    tmp.as_file_mut().sync_all().map_err(io_error(path))?;
    tmp.persist(path).map_err(|e| io_error(path)(e.error))?;
    Ok(())
}
