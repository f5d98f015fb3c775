use serde::Serialize;

use crate::crosswalk::CrosswalkSummary;
use crate::crosswalk::types::{CrosswalkEntry, PlayerRecord};

#[derive(Debug, Clone, Serialize)]
pub struct StoreContext {
    pub db_path: String,
    pub schema_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextStep {
    pub label: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub written: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerImportData {
    pub provider: String,
    pub sport: String,
    pub season: i64,
    pub source_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub replaced: i64,
    pub summary: ImportSummary,
    pub message: String,
    pub next_step: NextStep,
    pub store: StoreContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerListData {
    pub provider: String,
    pub sport: String,
    pub season: i64,
    pub total: i64,
    pub rows: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AliasImportData {
    pub sport: String,
    pub source_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub replaced: i64,
    pub summary: ImportSummary,
    pub message: String,
    pub store: StoreContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct AliasRow {
    pub alias_name: String,
    pub canonical_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AliasListData {
    pub sport: String,
    pub total: i64,
    pub rows: Vec<AliasRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrosswalkPreview {
    pub returned: i64,
    pub truncated: bool,
    pub rows: Vec<CrosswalkEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrosswalkBuildData {
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub sport: String,
    pub season: i64,
    pub message: String,
    pub summary: CrosswalkSummary,
    pub low_match_rate: bool,
    pub flagged_preview: CrosswalkPreview,
    pub next_step: NextStep,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrosswalkListData {
    pub sport: String,
    pub season: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub total: i64,
    pub rows: Vec<CrosswalkEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrosswalkRunRow {
    pub run_id: String,
    pub sport: String,
    pub season: i64,
    pub created_at: String,
    pub entries: i64,
    pub matched_exact: i64,
    pub matched_alias: i64,
    pub matched_fuzzy: i64,
    pub matched_cross_position: i64,
    pub unmatched: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrosswalkRunsData {
    pub sport: String,
    pub season: i64,
    pub rows: Vec<CrosswalkRunRow>,
}
