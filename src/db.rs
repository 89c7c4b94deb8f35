use anyhow::{anyhow, Result};
use rusqlite::Connection;

use crate::catalog::SourceKind;

const DB_PATH: &str = "data/smb.sqlite";

pub fn connect() -> Result<Connection> {
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sources (
            id         INTEGER PRIMARY KEY,
            url        TEXT UNIQUE NOT NULL,
            concept    TEXT NOT NULL,
            kind       TEXT NOT NULL CHECK(kind IN ('datasheet','cli_guide','admin_guide')),
            visited    BOOLEAN NOT NULL DEFAULT 0,
            visited_at TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_sources_visited ON sources(visited);
        CREATE INDEX IF NOT EXISTS idx_sources_kind ON sources(kind);

        CREATE TABLE IF NOT EXISTS page_data (
            id         INTEGER PRIMARY KEY,
            source_id  INTEGER NOT NULL REFERENCES sources(id),
            url        TEXT NOT NULL,
            concept    TEXT NOT NULL,
            kind       TEXT NOT NULL,
            html       TEXT,
            status     INTEGER,
            error      TEXT,
            latency_ms INTEGER,
            processed  BOOLEAN NOT NULL DEFAULT 0,
            fetched_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_page_data_kind ON page_data(kind);

        -- Extracted structured data
        CREATE TABLE IF NOT EXISTS family_features (
            id           INTEGER PRIMARY KEY,
            page_data_id INTEGER NOT NULL REFERENCES page_data(id),
            family       TEXT NOT NULL,
            url          TEXT NOT NULL,
            features     TEXT NOT NULL,
            processed_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_features_page ON family_features(page_data_id);

        CREATE TABLE IF NOT EXISTS cli_commands (
            id           INTEGER PRIMARY KEY,
            page_data_id INTEGER NOT NULL REFERENCES page_data(id),
            doc_id       TEXT UNIQUE NOT NULL,
            topic        TEXT,
            command_name TEXT,
            record       TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_cli_page ON cli_commands(page_data_id);

        CREATE TABLE IF NOT EXISTS guide_articles (
            id           INTEGER PRIMARY KEY,
            page_data_id INTEGER NOT NULL REFERENCES page_data(id),
            doc_id       TEXT UNIQUE NOT NULL,
            topic        TEXT,
            record       TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_articles_page ON guide_articles(page_data_id);
        ",
    )?;
    Ok(())
}

// ── Seeding ──

pub fn insert_sources(
    conn: &Connection,
    sources: &[(String, String, SourceKind)],
) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt =
            tx.prepare("INSERT OR IGNORE INTO sources (url, concept, kind) VALUES (?1, ?2, ?3)")?;
        for (url, concept, kind) in sources {
            count += stmt.execute(rusqlite::params![url, concept, kind.as_str()])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Fetching ──

pub struct SourceRow {
    pub source_id: i64,
    pub url: String,
    pub concept: String,
    pub kind: SourceKind,
}

pub fn fetch_unvisited(conn: &Connection, limit: Option<usize>) -> Result<Vec<SourceRow>> {
    let sql = format!(
        "SELECT id, url, concept, kind FROM sources WHERE visited = 0 ORDER BY id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter()
        .map(|(source_id, url, concept, kind)| {
            Ok(SourceRow {
                source_id,
                url,
                concept,
                kind: SourceKind::parse(&kind)
                    .ok_or_else(|| anyhow!("unknown source kind {:?}", kind))?,
            })
        })
        .collect()
}

pub struct FetchRow {
    pub source_id: i64,
    pub url: String,
    pub concept: String,
    pub kind: SourceKind,
    pub html: Option<String>,
    pub status: Option<i32>,
    pub error: Option<String>,
    pub latency_ms: Option<i64>,
}

pub fn save_fetch(conn: &Connection, row: &FetchRow) -> Result<()> {
    conn.execute(
        "INSERT INTO page_data (source_id, url, concept, kind, html, status, error, latency_ms)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            row.source_id,
            row.url,
            row.concept,
            row.kind.as_str(),
            row.html,
            row.status,
            row.error,
            row.latency_ms,
        ],
    )?;
    conn.execute(
        "UPDATE sources SET visited = 1, visited_at = datetime('now') WHERE id = ?1",
        [row.source_id],
    )?;
    Ok(())
}

// ── Processing ──

pub struct FetchedPage {
    pub page_data_id: i64,
    pub url: String,
    pub concept: String,
    pub kind: SourceKind,
    pub html: String,
}

pub fn fetch_unprocessed(conn: &Connection, limit: Option<usize>) -> Result<Vec<FetchedPage>> {
    let sql = format!(
        "SELECT id, url, concept, kind, html
         FROM page_data
         WHERE html IS NOT NULL AND processed = 0
         ORDER BY id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter()
        .map(|(page_data_id, url, concept, kind, html)| {
            Ok(FetchedPage {
                page_data_id,
                url,
                concept,
                kind: SourceKind::parse(&kind)
                    .ok_or_else(|| anyhow!("unknown source kind {:?}", kind))?,
                html,
            })
        })
        .collect()
}

pub fn mark_processed(conn: &Connection, page_data_ids: &[i64]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare("UPDATE page_data SET processed = 1 WHERE id = ?1")?;
        for id in page_data_ids {
            stmt.execute([id])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Extracted data ──

pub struct FamilyFeatureRow {
    pub page_data_id: i64,
    pub family: String,
    pub url: String,
    pub features: String,
}

pub struct GuideRecordRow {
    pub page_data_id: i64,
    pub doc_id: String,
    pub topic: String,
    pub command_name: Option<String>,
    pub record: String,
}

pub fn save_family_features(conn: &Connection, rows: &[FamilyFeatureRow]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO family_features (page_data_id, family, url, features)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for r in rows {
            stmt.execute(rusqlite::params![r.page_data_id, r.family, r.url, r.features])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn save_cli_commands(conn: &Connection, rows: &[GuideRecordRow]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO cli_commands (page_data_id, doc_id, topic, command_name, record)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for r in rows {
            stmt.execute(rusqlite::params![
                r.page_data_id,
                r.doc_id,
                r.topic,
                r.command_name,
                r.record
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn save_guide_articles(conn: &Connection, rows: &[GuideRecordRow]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO guide_articles (page_data_id, doc_id, topic, record)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for r in rows {
            stmt.execute(rusqlite::params![r.page_data_id, r.doc_id, r.topic, r.record])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Export ──

pub fn fetch_family_features(conn: &Connection) -> Result<Vec<(String, String, String)>> {
    let mut stmt =
        conn.prepare("SELECT family, url, features FROM family_features ORDER BY family, id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn fetch_guide_records(conn: &Connection, table: GuideTable) -> Result<Vec<String>> {
    let sql = match table {
        GuideTable::CliCommands => "SELECT record FROM cli_commands ORDER BY id",
        GuideTable::Articles => "SELECT record FROM guide_articles ORDER BY id",
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[derive(Clone, Copy)]
pub enum GuideTable {
    CliCommands,
    Articles,
}

// ── Overview ──

pub struct OverviewRow {
    pub family: String,
    pub url: String,
    pub model_count: usize,
    pub feature_count: usize,
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub visited: usize,
    pub unvisited: usize,
    pub fetched: usize,
    pub errors: usize,
    pub datasheets: usize,
    pub cli_commands: usize,
    pub articles: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM sources", [], |r| r.get(0))?;
    let visited: usize =
        conn.query_row("SELECT COUNT(*) FROM sources WHERE visited = 1", [], |r| r.get(0))?;
    let fetched: usize = conn.query_row("SELECT COUNT(*) FROM page_data", [], |r| r.get(0))?;
    let errors: usize = conn.query_row(
        "SELECT COUNT(*) FROM page_data WHERE error IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let datasheets: usize =
        conn.query_row("SELECT COUNT(*) FROM family_features", [], |r| r.get(0))?;
    let cli_commands: usize =
        conn.query_row("SELECT COUNT(*) FROM cli_commands", [], |r| r.get(0))?;
    let articles: usize =
        conn.query_row("SELECT COUNT(*) FROM guide_articles", [], |r| r.get(0))?;
    Ok(Stats {
        total,
        visited,
        unvisited: total - visited,
        fetched,
        errors,
        datasheets,
        cli_commands,
        articles,
    })
}
