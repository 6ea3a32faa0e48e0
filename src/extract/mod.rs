//! LinkedIn CSV export parsing.
//!
//! Turns the raw export into discrete, un-chunked post records. A malformed
//! row is skipped and counted rather than failing the whole extraction, and
//! missing fields get fixed defaults so every downstream payload keeps the
//! same shape.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// One LinkedIn post, embedded and stored as a single unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostRecord {
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_likes")]
    pub likes: u64,
}

/// Extraction result: records in input row order plus the rows dropped.
#[derive(Debug, Clone, Default)]
pub struct ExtractOutcome {
    pub posts: Vec<PostRecord>,
    pub skipped_rows: usize,
}

/// Parses a raw LinkedIn CSV export with a `text,url,date,likes` header.
///
/// Row order is preserved and no deduplication is applied. Rows whose text
/// is empty after trimming carry nothing to embed and count as skipped.
pub fn extract_posts(raw: &str) -> ExtractOutcome {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut outcome = ExtractOutcome::default();
    for (row, parsed) in reader.deserialize::<PostRecord>().enumerate() {
        match parsed {
            Ok(post) if !post.text.is_empty() => outcome.posts.push(post),
            Ok(_) => {
                warn!(row, "skipping post row with empty text");
                outcome.skipped_rows += 1;
            }
            Err(err) => {
                warn!(row, %err, "skipping malformed post row");
                outcome.skipped_rows += 1;
            }
        }
    }
    outcome
}

/// Accepts an empty or missing likes cell as zero.
fn deserialize_likes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u64>()
        .map_err(|err| serde::de::Error::custom(format!("unable to parse likes '{trimmed}': {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order_with_all_fields() {
        let raw = "text,url,date,likes\n\
                   First post,https://example.com/a,2024-01-05,12\n\
                   Second post,https://example.com/b,2024-02-10,3\n";
        let outcome = extract_posts(raw);
        assert_eq!(outcome.skipped_rows, 0);
        assert_eq!(
            outcome.posts,
            vec![
                PostRecord {
                    text: "First post".into(),
                    url: "https://example.com/a".into(),
                    date: "2024-01-05".into(),
                    likes: 12,
                },
                PostRecord {
                    text: "Second post".into(),
                    url: "https://example.com/b".into(),
                    date: "2024-02-10".into(),
                    likes: 3,
                },
            ]
        );
    }

    #[test]
    fn defaults_missing_fields_without_nulls() {
        let raw = "text,url,date,likes\nJust text,,,\n";
        let outcome = extract_posts(raw);
        assert_eq!(outcome.posts.len(), 1);
        let post = &outcome.posts[0];
        assert_eq!(post.url, "");
        assert_eq!(post.date, "");
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn skips_and_counts_malformed_rows() {
        let raw = "text,url,date,likes\n\
                   Good post,https://example.com/a,2024-01-05,7\n\
                   Bad likes,https://example.com/b,2024-01-06,not-a-number\n\
                   Another good one,https://example.com/c,2024-01-07,1\n";
        let outcome = extract_posts(raw);
        assert_eq!(outcome.skipped_rows, 1);
        assert_eq!(outcome.posts.len(), 2);
        assert_eq!(outcome.posts[0].text, "Good post");
        assert_eq!(outcome.posts[1].text, "Another good one");
    }

    #[test]
    fn skips_rows_with_empty_text() {
        let raw = "text,url,date,likes\n,https://example.com/a,2024-01-05,7\n";
        let outcome = extract_posts(raw);
        assert!(outcome.posts.is_empty());
        assert_eq!(outcome.skipped_rows, 1);
    }

    #[test]
    fn handles_quoted_multiline_text() {
        let raw = "text,url,date,likes\n\
                   \"A post\nwith two lines\",https://example.com/a,2024-01-05,2\n";
        let outcome = extract_posts(raw);
        assert_eq!(outcome.posts.len(), 1);
        assert_eq!(outcome.posts[0].text, "A post\nwith two lines");
    }

    #[test]
    fn empty_input_extracts_nothing() {
        let outcome = extract_posts("");
        assert!(outcome.posts.is_empty());
        assert_eq!(outcome.skipped_rows, 0);
    }
}
