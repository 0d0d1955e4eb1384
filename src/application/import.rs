//! One-time bootstrap of the news table from a JSON export or from built-in samples.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::news::{CreateNewsCommand, ImportReport, NewsError, NewsService};
use crate::domain::{news::format_news_date, types::NewsStatus};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{path}` is not a JSON array of news items: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    News(#[from] NewsError),
}

/// One entry of the import file. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ImportItem {
    title: Option<String>,
    date: Option<String>,
    link: Option<String>,
    content: Option<String>,
}

impl From<ImportItem> for CreateNewsCommand {
    fn from(item: ImportItem) -> Self {
        Self {
            title: item.title,
            content: item.content,
            date: item.date,
            link: item.link,
            status: Some(NewsStatus::Published.as_str().to_string()),
        }
    }
}

/// Parse the raw file contents. Entries that are not objects of the expected shape are
/// replaced by empty commands so that validation reports them with their index.
pub fn parse_import_document(
    contents: &str,
    path: &Path,
) -> Result<Vec<CreateNewsCommand>, ImportError> {
    let entries: Vec<Value> =
        serde_json::from_str(contents).map_err(|source| ImportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<ImportItem>(entry)
                .unwrap_or_default()
                .into()
        })
        .collect())
}

/// Import `path` into an empty store. With `seed_if_missing`, a missing file falls back to
/// the sample items.
pub async fn import_file(
    service: &NewsService,
    path: &Path,
    seed_if_missing: bool,
) -> Result<ImportReport, ImportError> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && seed_if_missing => {
            warn!(
                target = "newsroom::import",
                path = %path.display(),
                "import file not found, seeding sample news instead"
            );
            return seed_samples(service).await;
        }
        Err(source) => {
            return Err(ImportError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let items = parse_import_document(&contents, path)?;
    info!(
        target = "newsroom::import",
        path = %path.display(),
        items = items.len(),
        "importing news"
    );

    let report = service.import(items).await?;
    log_report(service, &report).await?;
    Ok(report)
}

pub async fn seed_samples(service: &NewsService) -> Result<ImportReport, ImportError> {
    let report = service.import(sample_items()).await?;
    log_report(service, &report).await?;
    Ok(report)
}

pub fn sample_items() -> Vec<CreateNewsCommand> {
    [
        (
            "New semester enrolment is open",
            "Enrolment for the upcoming semester is now open. Please complete registration before the deadline.",
            "2025-09-10",
            "https://example.com/news/enrolment",
        ),
        (
            "Library opening hours updated",
            "From next week the library stays open until 22:00 on weekdays.",
            "2025-09-05",
            "https://example.com/news/library-hours",
        ),
        (
            "Campus safety reminder",
            "Please keep your student card with you at all times while on campus.",
            "2025-09-01",
            "",
        ),
    ]
    .into_iter()
    .map(|(title, content, date, link)| CreateNewsCommand {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        date: Some(date.to_string()),
        link: Some(link.to_string()),
        status: Some(NewsStatus::Published.as_str().to_string()),
    })
    .collect()
}

async fn log_report(service: &NewsService, report: &ImportReport) -> Result<(), ImportError> {
    if let Some(existing) = report.existing {
        info!(
            target = "newsroom::import",
            existing, "store already contains news, import skipped"
        );
        return Ok(());
    }

    info!(
        target = "newsroom::import",
        inserted = report.inserted,
        skipped = report.skipped.len(),
        "import finished"
    );

    for item in service.all().await? {
        debug!(
            target = "newsroom::import",
            id = item.id,
            date = %format_news_date(item.date),
            title = %item.title,
            "stored news item"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_and_forces_published_status() {
        let commands = parse_import_document(
            r#"[{"title": "A", "date": "2025-01-01", "link": ""}, 42, {"date": "2025-01-02"}]"#,
            Path::new("news.json"),
        )
        .expect("valid array");

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].title.as_deref(), Some("A"));
        assert_eq!(commands[0].status.as_deref(), Some("published"));
        assert!(commands[1].title.is_none());
        assert!(commands[2].title.is_none());
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = parse_import_document(r#"{"title": "A"}"#, Path::new("news.json"))
            .expect_err("object is not an array");
        assert!(matches!(err, ImportError::Parse { .. }));
    }

    #[test]
    fn samples_are_valid() {
        for command in sample_items() {
            command
                .into_create_params()
                .expect("sample items validate");
        }
    }
}
