// Data Loader - reads CSV/YAML artifacts from the data directory, runs
// quality gates, and caches results keyed by (path, mtime, size).
//
// The loader exclusively owns the cached tables. Pages receive Arc
// snapshots; a reload replaces the whole table (atomic replace-on-write
// under the slot mutex), never mutates it in place. Each slot carries a
// read counter so cache behavior is observable in tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use csv::StringRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::entities::{
    normalize_id, Building, ChannelConfig, Company, ExclusionConfig, NaicsFitScore, ResearchScore,
    ScoredCompany,
};
use crate::error::{LoadError, LoadResult};
use crate::quality::{
    check_coordinate_coverage, check_critical_completeness, check_join_integrity,
    check_naics_presence, check_unique_keys, validate_table, GateIssue, GateOutcome,
};
use crate::schema::{self, TableSchema};

// ============================================================================
// TABLE IDENTITY & AVAILABILITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableName {
    Companies,
    Buildings,
    ScoredCompanies,
    NaicsFitScores,
    ResearchScores,
    Exclusions,
    Channels,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Companies => "companies",
            TableName::Buildings => "buildings",
            TableName::ScoredCompanies => "scored_companies",
            TableName::NaicsFitScores => "naics_fit_scores",
            TableName::ResearchScores => "research_scores",
            TableName::Exclusions => "exclusions",
            TableName::Channels => "channels",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "companies" => Some(TableName::Companies),
            "buildings" => Some(TableName::Buildings),
            "scored_companies" => Some(TableName::ScoredCompanies),
            "naics_fit_scores" => Some(TableName::NaicsFitScores),
            "research_scores" => Some(TableName::ResearchScores),
            "exclusions" => Some(TableName::Exclusions),
            "channels" => Some(TableName::Channels),
            _ => None,
        }
    }

    pub const ALL: [TableName; 7] = [
        TableName::Companies,
        TableName::Buildings,
        TableName::ScoredCompanies,
        TableName::NaicsFitScores,
        TableName::ResearchScores,
        TableName::Exclusions,
        TableName::Channels,
    ];
}

/// One loaded table snapshot plus everything the pages need to know about it
#[derive(Debug)]
pub struct TableData<T> {
    pub rows: Vec<T>,
    /// Non-blocking gate findings surfaced as the page banner
    pub warnings: Vec<GateIssue>,
    pub loaded_at: DateTime<Utc>,
    pub source_path: PathBuf,
    pub file: &'static str,
}

/// Three-way availability marker every page branches on
#[derive(Debug)]
pub enum Availability<T> {
    Present(Arc<TableData<T>>),
    /// Optional file absent: the dependent UI section degrades
    AbsentOptional { file: &'static str },
    /// Required file absent: fatal at startup, error page afterwards
    AbsentRequired { file: &'static str, path: PathBuf },
}

impl<T> Clone for Availability<T> {
    fn clone(&self) -> Self {
        match self {
            Availability::Present(data) => Availability::Present(Arc::clone(data)),
            Availability::AbsentOptional { file } => Availability::AbsentOptional { file },
            Availability::AbsentRequired { file, path } => Availability::AbsentRequired {
                file,
                path: path.clone(),
            },
        }
    }
}

impl<T> Availability<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Availability::Present(_))
    }

    pub fn present(&self) -> Option<&Arc<TableData<T>>> {
        match self {
            Availability::Present(data) => Some(data),
            _ => None,
        }
    }

    /// Convert an absence into the fatal error used at startup
    pub fn into_required(self) -> LoadResult<Arc<TableData<T>>> {
        match self {
            Availability::Present(data) => Ok(data),
            Availability::AbsentOptional { file } => Err(LoadError::MissingRequired {
                file,
                path: PathBuf::new(),
            }),
            Availability::AbsentRequired { file, path } => {
                Err(LoadError::MissingRequired { file, path })
            }
        }
    }
}

// ============================================================================
// CACHE SLOTS
// ============================================================================

/// Cache key: (path, mtime, size)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    path: PathBuf,
    mtime: SystemTime,
    len: u64,
}

fn fingerprint(path: &Path) -> std::io::Result<Fingerprint> {
    let meta = std::fs::metadata(path)?;
    Ok(Fingerprint {
        path: path.to_path_buf(),
        mtime: meta.modified()?,
        len: meta.len(),
    })
}

struct CacheEntry<T> {
    fingerprint: Fingerprint,
    data: Arc<TableData<T>>,
}

struct Slot<T> {
    entry: Mutex<Option<CacheEntry<T>>>,
    reads: AtomicU64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot {
            entry: Mutex::new(None),
            reads: AtomicU64::new(0),
        }
    }
}

impl<T> Slot<T> {
    fn clear(&self) {
        *self.entry.lock().unwrap() = None;
    }
}

struct ConfigSlot<C> {
    entry: Mutex<Option<(Fingerprint, Arc<C>)>>,
    reads: AtomicU64,
}

impl<C> Default for ConfigSlot<C> {
    fn default() -> Self {
        ConfigSlot {
            entry: Mutex::new(None),
            reads: AtomicU64::new(0),
        }
    }
}

impl<C> ConfigSlot<C> {
    fn clear(&self) {
        *self.entry.lock().unwrap() = None;
    }
}

/// Read a file, retrying once on transient failure before escalating
fn read_with_retry(path: &Path) -> std::io::Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(first) => {
            debug!(path = %path.display(), error = %first, "read failed, retrying once");
            std::fs::read(path)
        }
    }
}

// ============================================================================
// DATA LOADER
// ============================================================================

pub struct DataLoader {
    data_dir: PathBuf,
    companies: Slot<Company>,
    buildings: Slot<Building>,
    scored: Slot<ScoredCompany>,
    naics_scores: Slot<NaicsFitScore>,
    research_scores: Slot<ResearchScore>,
    exclusions: ConfigSlot<ExclusionConfig>,
    channels: ConfigSlot<ChannelConfig>,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataLoader {
            data_dir: data_dir.into(),
            companies: Slot::default(),
            buildings: Slot::default(),
            scored: Slot::default(),
            naics_scores: Slot::default(),
            research_scores: Slot::default(),
            exclusions: ConfigSlot::default(),
            channels: ConfigSlot::default(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // ========================================================================
    // TYPED ACCESSORS
    // ========================================================================

    /// companies.csv (required)
    pub fn companies(&self) -> LoadResult<Availability<Company>> {
        let path = self.data_dir.join(schema::COMPANIES.rel_path);
        self.load_csv_table(
            &self.companies,
            &schema::COMPANIES,
            path,
            |headers, records| {
                let mut outcome = check_naics_presence(&schema::COMPANIES, headers, records);
                outcome.merge(check_unique_keys(
                    schema::COMPANIES.file,
                    schema::COMPANIES.key,
                    key_cells(headers, records, schema::COMPANIES.key),
                ));
                outcome
            },
            |rows: &mut Vec<Company>| {
                for company in rows.iter_mut() {
                    company.normalize();
                }
            },
        )
    }

    /// golden_buildings.csv preferred, buildings.csv fallback (one required)
    pub fn buildings(&self) -> LoadResult<Availability<Building>> {
        let golden_path = self.data_dir.join(schema::GOLDEN_BUILDINGS.rel_path);
        if golden_path.exists() {
            // The golden variant is an optional enhancement of the same
            // table; when it fails to load, fall through to buildings.csv
            // rather than aborting (load_csv_table already warned).
            let golden = self.load_building_table(&schema::GOLDEN_BUILDINGS, golden_path)?;
            if golden.is_present() {
                return Ok(golden);
            }
            warn!("golden_buildings.csv unusable, falling back to buildings.csv");
        } else {
            warn!("golden_buildings.csv not found, using buildings.csv (no served buildings)");
        }

        let path = self.data_dir.join(schema::BUILDINGS.rel_path);
        match self.load_building_table(&schema::BUILDINGS, path)? {
            Availability::AbsentOptional { .. } | Availability::AbsentRequired { .. } => {
                Ok(Availability::AbsentRequired {
                    file: schema::BUILDINGS.file,
                    path: self.data_dir.join(schema::BUILDINGS.rel_path),
                })
            }
            present => Ok(present),
        }
    }

    fn load_building_table(
        &self,
        table_schema: &'static TableSchema,
        path: PathBuf,
    ) -> LoadResult<Availability<Building>> {
        self.load_csv_table(
            &self.buildings,
            table_schema,
            path,
            |headers, records| {
                check_unique_keys(
                    table_schema.file,
                    table_schema.key,
                    key_cells(headers, records, table_schema.key),
                )
            },
            |rows: &mut Vec<Building>| {
                for building in rows.iter_mut() {
                    building.normalize();
                }
            },
        )
    }

    /// scored_companies_final.csv (required)
    pub fn scored_companies(&self) -> LoadResult<Availability<ScoredCompany>> {
        let path = self.data_dir.join(schema::SCORED_COMPANIES.rel_path);
        self.load_csv_table(
            &self.scored,
            &schema::SCORED_COMPANIES,
            path,
            |headers, records| {
                let mut outcome =
                    check_critical_completeness(&schema::SCORED_COMPANIES, headers, records);
                outcome.merge(check_unique_keys(
                    schema::SCORED_COMPANIES.file,
                    schema::SCORED_COMPANIES.key,
                    key_cells(headers, records, schema::SCORED_COMPANIES.key),
                ));
                outcome.merge(check_naics_presence(
                    &schema::SCORED_COMPANIES,
                    headers,
                    records,
                ));
                outcome
            },
            |_rows: &mut Vec<ScoredCompany>| {},
        )
    }

    /// naics_icp_fit_scores.csv (optional)
    pub fn naics_fit_scores(&self) -> LoadResult<Availability<NaicsFitScore>> {
        let path = self.data_dir.join(schema::NAICS_FIT_SCORES.rel_path);
        self.load_csv_table(
            &self.naics_scores,
            &schema::NAICS_FIT_SCORES,
            path,
            |headers, records| {
                check_unique_keys(
                    schema::NAICS_FIT_SCORES.file,
                    schema::NAICS_FIT_SCORES.key,
                    key_cells(headers, records, schema::NAICS_FIT_SCORES.key),
                )
            },
            |_rows: &mut Vec<NaicsFitScore>| {},
        )
    }

    /// company_icp_scores_with_research.csv (optional)
    pub fn research_scores(&self) -> LoadResult<Availability<ResearchScore>> {
        let path = self.data_dir.join(schema::RESEARCH_SCORES.rel_path);
        self.load_csv_table(
            &self.research_scores,
            &schema::RESEARCH_SCORES,
            path,
            |_headers, _records| GateOutcome::default(),
            |_rows: &mut Vec<ResearchScore>| {},
        )
    }

    /// exclusions.yaml (optional; absent means no exclusions)
    pub fn exclusions(&self) -> Arc<ExclusionConfig> {
        self.load_yaml_config(
            &self.exclusions,
            schema::EXCLUSIONS_REL_PATH,
            schema::EXCLUSIONS_FILE,
        )
    }

    /// channels.yaml (optional; absent means raw channel ids are shown)
    pub fn channels(&self) -> Arc<ChannelConfig> {
        self.load_yaml_config(
            &self.channels,
            schema::CHANNELS_REL_PATH,
            schema::CHANNELS_FILE,
        )
    }

    // ========================================================================
    // CACHE CONTROL
    // ========================================================================

    /// Clear one cache entry, forcing the next load to re-read from disk.
    /// Triggered by the explicit "Refresh Data" action.
    pub fn invalidate(&self, table: TableName) {
        match table {
            TableName::Companies => self.companies.clear(),
            TableName::Buildings => self.buildings.clear(),
            TableName::ScoredCompanies => self.scored.clear(),
            TableName::NaicsFitScores => self.naics_scores.clear(),
            TableName::ResearchScores => self.research_scores.clear(),
            TableName::Exclusions => self.exclusions.clear(),
            TableName::Channels => self.channels.clear(),
        }
        info!(table = table.as_str(), "cache entry invalidated");
    }

    pub fn invalidate_all(&self) {
        for table in TableName::ALL {
            self.invalidate(table);
        }
    }

    /// Number of disk reads performed for a table (cache misses)
    pub fn reads(&self, table: TableName) -> u64 {
        let counter = match table {
            TableName::Companies => &self.companies.reads,
            TableName::Buildings => &self.buildings.reads,
            TableName::ScoredCompanies => &self.scored.reads,
            TableName::NaicsFitScores => &self.naics_scores.reads,
            TableName::ResearchScores => &self.research_scores.reads,
            TableName::Exclusions => &self.exclusions.reads,
            TableName::Channels => &self.channels.reads,
        };
        counter.load(Ordering::Relaxed)
    }

    // ========================================================================
    // STARTUP PREFLIGHT
    // ========================================================================

    /// Load all required tables, run the cross-table gates, and collect
    /// every non-blocking finding. Any error here must abort startup.
    pub fn preflight(&self) -> LoadResult<StartupReport> {
        let companies = self.companies()?.into_required()?;
        let buildings = self.buildings()?.into_required()?;
        let scored = self.scored_companies()?.into_required()?;

        let mut warnings: Vec<GateIssue> = Vec::new();
        warnings.extend(companies.warnings.iter().cloned());
        warnings.extend(buildings.warnings.iter().cloned());
        warnings.extend(scored.warnings.iter().cloned());

        // Join integrity: soft invariant, unmatched rows are preserved
        // null-filled in merged views and reported here.
        let company_ids: HashSet<&str> = companies
            .rows
            .iter()
            .map(|c| normalize_id(&c.company_id))
            .collect();

        let scored_join = check_join_integrity(
            schema::SCORED_COMPANIES.file,
            schema::COMPANIES.file,
            scored.rows.iter().map(|s| normalize_id(&s.company_id)),
            &company_ids,
        );
        warnings.extend(scored_join.issues);

        let building_join = check_join_integrity(
            schema::BUILDINGS.file,
            schema::COMPANIES.file,
            buildings.rows.iter().map(|b| normalize_id(&b.company_id)),
            &company_ids,
        );
        warnings.extend(building_join.issues);

        warnings.extend(check_coordinate_coverage(&buildings.rows).issues);

        for issue in &warnings {
            warn!(gate = %issue.gate, "{}", issue.message);
        }

        info!(
            companies = companies.rows.len(),
            buildings = buildings.rows.len(),
            scored = scored.rows.len(),
            "startup preflight passed"
        );

        Ok(StartupReport {
            companies: companies.rows.len(),
            buildings: buildings.rows.len(),
            scored_companies: scored.rows.len(),
            warnings,
        })
    }

    /// Availability and row counts for every table, for /api/status
    pub fn status(&self) -> Vec<TableStatus> {
        let mut statuses = vec![
            TableStatus::from_result("companies", self.companies()),
            TableStatus::from_result("buildings", self.buildings()),
            TableStatus::from_result("scored_companies", self.scored_companies()),
            TableStatus::from_result("naics_fit_scores", self.naics_fit_scores()),
            TableStatus::from_result("research_scores", self.research_scores()),
        ];

        // Config availability is the file's presence on disk, not whether
        // it currently enables anything (all-disabled exclusions still
        // count as present).
        let exclusions_present = self.data_dir.join(schema::EXCLUSIONS_REL_PATH).is_file();
        let exclusions = self.exclusions();
        statuses.push(TableStatus {
            table: "exclusions".to_string(),
            state: config_state(exclusions_present),
            rows: exclusions_present.then(|| exclusions.excluded_naics_codes().len()),
            loaded_at: None,
            warnings: Vec::new(),
            error: None,
        });

        let channels_present = self.data_dir.join(schema::CHANNELS_REL_PATH).is_file();
        let channels = self.channels();
        statuses.push(TableStatus {
            table: "channels".to_string(),
            state: config_state(channels_present),
            rows: channels_present.then(|| channels.channels.len()),
            loaded_at: None,
            warnings: Vec::new(),
            error: None,
        });

        statuses
    }

    // ========================================================================
    // INTERNAL LOAD PATHS
    // ========================================================================

    fn load_csv_table<T, G, P>(
        &self,
        slot: &Slot<T>,
        table_schema: &TableSchema,
        path: PathBuf,
        extra_gates: G,
        post: P,
    ) -> LoadResult<Availability<T>>
    where
        T: DeserializeOwned,
        G: Fn(&StringRecord, &[StringRecord]) -> GateOutcome,
        P: Fn(&mut Vec<T>),
    {
        let current = match fingerprint(&path) {
            Ok(fp) => fp,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(self.absent(table_schema, path));
            }
            Err(err) => {
                return self.degrade_io(table_schema, path, err);
            }
        };

        let mut guard = slot.entry.lock().unwrap();
        if let Some(entry) = guard.as_ref() {
            if entry.fingerprint == current {
                return Ok(Availability::Present(Arc::clone(&entry.data)));
            }
        }

        // Cache miss: read, gate, deserialize, replace
        let bytes = match read_with_retry(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(self.absent(table_schema, path));
            }
            Err(err) => {
                return self.degrade_io(table_schema, path, err);
            }
        };
        slot.reads.fetch_add(1, Ordering::Relaxed);

        let parsed = parse_csv(&bytes);
        let (headers, records) = match parsed {
            Ok(parts) => parts,
            Err(source) => {
                if table_schema.required_file {
                    return Err(LoadError::Malformed {
                        file: table_schema.file,
                        path,
                        source,
                    });
                }
                warn!(
                    file = table_schema.file,
                    error = %source,
                    "optional file unreadable, section degraded"
                );
                return Ok(Availability::AbsentOptional {
                    file: table_schema.file,
                });
            }
        };

        let mut outcome = validate_table(table_schema, &headers, &records);
        outcome.merge(extra_gates(&headers, &records));

        if !outcome.valid() {
            if table_schema.required_file {
                return Err(LoadError::Gate {
                    file: table_schema.file,
                    issues: outcome.blocking_issues(),
                });
            }
            warn!(
                file = table_schema.file,
                "{}; optional table degraded",
                outcome.summary()
            );
            return Ok(Availability::AbsentOptional {
                file: table_schema.file,
            });
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            let row: T = match record.deserialize(Some(&headers)) {
                Ok(row) => row,
                Err(source) => {
                    if table_schema.required_file {
                        return Err(LoadError::Malformed {
                            file: table_schema.file,
                            path,
                            source,
                        });
                    }
                    warn!(
                        file = table_schema.file,
                        error = %source,
                        "optional file row undeserializable, section degraded"
                    );
                    return Ok(Availability::AbsentOptional {
                        file: table_schema.file,
                    });
                }
            };
            rows.push(row);
        }
        post(&mut rows);

        info!(
            file = table_schema.file,
            rows = rows.len(),
            warnings = outcome.warnings().len(),
            "loaded table from {}",
            path.display()
        );

        let data = Arc::new(TableData {
            rows,
            warnings: outcome.warnings(),
            loaded_at: Utc::now(),
            source_path: path,
            file: table_schema.file,
        });
        *guard = Some(CacheEntry {
            fingerprint: current,
            data: Arc::clone(&data),
        });

        Ok(Availability::Present(data))
    }

    fn absent<T>(&self, table_schema: &TableSchema, path: PathBuf) -> Availability<T> {
        if table_schema.required_file {
            Availability::AbsentRequired {
                file: table_schema.file,
                path,
            }
        } else {
            info!(
                file = table_schema.file,
                "optional file not found, section degraded"
            );
            Availability::AbsentOptional {
                file: table_schema.file,
            }
        }
    }

    fn degrade_io<T>(
        &self,
        table_schema: &TableSchema,
        path: PathBuf,
        err: std::io::Error,
    ) -> LoadResult<Availability<T>> {
        if table_schema.required_file {
            Err(LoadError::Io { path, source: err })
        } else {
            warn!(
                file = table_schema.file,
                error = %err,
                "optional file unreadable, section degraded"
            );
            Ok(Availability::AbsentOptional {
                file: table_schema.file,
            })
        }
    }

    fn load_yaml_config<C>(&self, slot: &ConfigSlot<C>, rel_path: &str, file: &str) -> Arc<C>
    where
        C: DeserializeOwned + Default,
    {
        let path = self.data_dir.join(rel_path);
        let current = match fingerprint(&path) {
            Ok(fp) => fp,
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    info!(file, "config not found, using defaults");
                } else {
                    warn!(file, error = %err, "config unreadable, using defaults");
                }
                return Arc::new(C::default());
            }
        };

        let mut guard = slot.entry.lock().unwrap();
        if let Some((fp, config)) = guard.as_ref() {
            if *fp == current {
                return Arc::clone(config);
            }
        }

        let bytes = match read_with_retry(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(file, error = %err, "config unreadable, using defaults");
                return Arc::new(C::default());
            }
        };
        slot.reads.fetch_add(1, Ordering::Relaxed);

        let config: C = match serde_yaml::from_slice(&bytes) {
            Ok(config) => config,
            Err(err) => {
                warn!(file, error = %err, "invalid YAML, using defaults");
                return Arc::new(C::default());
            }
        };

        info!(file, "loaded config from {}", path.display());
        let config = Arc::new(config);
        *guard = Some((current, Arc::clone(&config)));
        config
    }
}

fn config_state(present: bool) -> String {
    if present { "present" } else { "absent_optional" }.to_string()
}

fn parse_csv(bytes: &[u8]) -> Result<(StringRecord, Vec<StringRecord>), csv::Error> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }
    Ok((headers, records))
}

fn key_cells<'a>(
    headers: &StringRecord,
    records: &'a [StringRecord],
    key: &str,
) -> impl Iterator<Item = &'a str> {
    let idx = headers.iter().position(|h| h == key);
    records
        .iter()
        .filter_map(move |r| idx.and_then(|i| r.get(i)))
}

// ============================================================================
// REPORTS
// ============================================================================

/// Outcome of the startup preflight over the required tables
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    pub companies: usize,
    pub buildings: usize,
    pub scored_companies: usize,
    pub warnings: Vec<GateIssue>,
}

/// One table's availability for /api/status
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    pub table: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<GateIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableStatus {
    fn from_result<T>(table: &str, result: LoadResult<Availability<T>>) -> Self {
        match result {
            Ok(Availability::Present(data)) => TableStatus {
                table: table.to_string(),
                state: "present".to_string(),
                rows: Some(data.rows.len()),
                loaded_at: Some(data.loaded_at),
                warnings: data.warnings.clone(),
                error: None,
            },
            Ok(Availability::AbsentOptional { .. }) => TableStatus {
                table: table.to_string(),
                state: "absent_optional".to_string(),
                rows: None,
                loaded_at: None,
                warnings: Vec::new(),
                error: None,
            },
            Ok(Availability::AbsentRequired { file, path }) => TableStatus {
                table: table.to_string(),
                state: "absent_required".to_string(),
                rows: None,
                loaded_at: None,
                warnings: Vec::new(),
                error: Some(format!(
                    "required file not found: {} (expected at {})",
                    file,
                    path.display()
                )),
            },
            Err(err) => TableStatus {
                table: table.to_string(),
                state: "error".to_string(),
                rows: None,
                loaded_at: None,
                warnings: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
