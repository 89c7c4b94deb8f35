use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::db::{FetchRow, SourceRow};

const CONCURRENCY: usize = 4;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/120.0 Safari/537.36";

/// Fetch stats returned after completion.
pub struct FetchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Fetch pages concurrently, saving each result to DB as it arrives.
/// Each source gets exactly one attempt; a failed fetch is recorded as an
/// error row and the source is still marked visited so the queue drains.
pub async fn fetch_pages_streaming(
    conn: &Connection,
    sources: Vec<SourceRow>,
) -> Result<FetchStats> {
    let client = build_client()?;
    let semaphore = Arc::new(Semaphore::new(CONCURRENCY));
    let total = sources.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    // Channel: workers send results, main loop saves to DB
    let (tx, mut rx) = tokio::sync::mpsc::channel::<FetchRow>(CONCURRENCY * 2);

    for source in sources {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            let row = fetch_one(&client, source).await;
            if let Some(e) = &row.error {
                warn!("Fetch failed for {}: {}", row.url, e);
            }
            let _ = tx.send(row).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut ok = 0usize;
    let mut errors = 0usize;

    // Prepare statements once, reuse for each row
    let mut insert_stmt = conn.prepare(
        "INSERT INTO page_data (source_id, url, concept, kind, html, status, error, latency_ms)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    let mut update_stmt =
        conn.prepare("UPDATE sources SET visited = 1, visited_at = datetime('now') WHERE id = ?1")?;

    while let Some(row) = rx.recv().await {
        if row.error.is_some() {
            errors += 1;
        } else {
            ok += 1;
        }
        save_one(&mut insert_stmt, &mut update_stmt, &row)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Fetched {} pages ({} ok, {} errors)", total, ok, errors);

    Ok(FetchStats { total, ok, errors })
}

/// Save a single fetch result to DB using pre-prepared statements.
fn save_one(
    insert: &mut rusqlite::Statement,
    update: &mut rusqlite::Statement,
    row: &FetchRow,
) -> Result<()> {
    insert.execute(rusqlite::params![
        row.source_id,
        row.url,
        row.concept,
        row.kind.as_str(),
        row.html,
        row.status,
        row.error,
        row.latency_ms,
    ])?;
    update.execute(rusqlite::params![row.source_id])?;
    Ok(())
}

async fn fetch_one(client: &reqwest::Client, source: SourceRow) -> FetchRow {
    let start = Instant::now();
    let mut row = FetchRow {
        source_id: source.source_id,
        url: source.url,
        concept: source.concept,
        kind: source.kind,
        html: None,
        status: None,
        error: None,
        latency_ms: None,
    };

    match client.get(&row.url).send().await {
        Ok(resp) => {
            let status = resp.status();
            row.status = Some(status.as_u16() as i32);
            match resp.text().await {
                Ok(body) if status.is_success() => row.html = Some(body),
                Ok(_) => row.error = Some(format!("HTTP {}", status.as_u16())),
                Err(e) => row.error = Some(e.to_string()),
            }
        }
        Err(e) => row.error = Some(e.to_string()),
    }
    row.latency_ms = Some(start.elapsed().as_millis() as i64);
    row
}
