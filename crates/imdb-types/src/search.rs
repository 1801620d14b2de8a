//! Search API payloads

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a missing or `null` value as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One candidate title returned by the search endpoint.
///
/// The detail endpoint echoes the same record under `fake`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(rename = "#TITLE", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "#YEAR", default)]
    pub year: Option<i32>,
    #[serde(rename = "#IMDB_ID", default, deserialize_with = "null_as_default")]
    pub imdb_id: String,
    #[serde(rename = "#RANK", default)]
    pub rank: Option<i64>,
    #[serde(rename = "#ACTORS", default, deserialize_with = "null_as_default")]
    pub actors: String,
    #[serde(rename = "#AKA", default, deserialize_with = "null_as_default")]
    pub aka: String,
    #[serde(rename = "#IMDB_URL", default, deserialize_with = "null_as_default")]
    pub imdb_url: String,
    /// Instant-view link used for the card's button
    #[serde(rename = "#IMDB_IV", default, deserialize_with = "null_as_default")]
    pub imdb_iv: String,
    #[serde(rename = "#IMG_POSTER", default, skip_serializing_if = "Option::is_none")]
    pub img_poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_height: Option<u32>,
}

impl SearchRecord {
    /// Poster URL, if one is present and not blank.
    pub fn poster(&self) -> Option<&str> {
        self.img_poster
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// `"{title} {year}"`, or just the title when the year is unknown.
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} {}", self.title, year),
            None => self.title.clone(),
        }
    }

    /// `"{aka} | {rank} | {actors}"` shown under the card title.
    pub fn summary(&self) -> String {
        let rank = self.rank.map(|r| r.to_string()).unwrap_or_default();
        format!("{} | {} | {}", self.aka, rank, self.actors)
    }
}

/// Envelope returned by `GET <api>/?q=<query>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchApiResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: Vec<SearchRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "ok": true,
        "description": [
            {
                "#TITLE": "The Matrix",
                "#YEAR": 1999,
                "#IMDB_ID": "tt0133093",
                "#RANK": 32,
                "#ACTORS": "Keanu Reeves, Laurence Fishburne",
                "#AKA": "The Matrix (1999)",
                "#IMDB_URL": "https://imdb.com/title/tt0133093",
                "#IMDB_IV": "https://t.me/iv?url=https%3A%2F%2Fimdb.com%2Ftitle%2Ftt0133093",
                "#IMG_POSTER": "https://m.media-amazon.com/images/M/matrix.jpg",
                "photo_width": 2100,
                "photo_height": 3156
            },
            {
                "#TITLE": "The Matrix Resurrections",
                "#IMDB_ID": "tt10838180",
                "#IMG_POSTER": null
            }
        ],
        "error_code": 200
    }"##;

    #[test]
    fn test_deserialize_search_response() {
        let response: SearchApiResponse = serde_json::from_str(SAMPLE).unwrap();
        assert!(response.ok);
        assert_eq!(response.error_code, Some(200));
        assert_eq!(response.description.len(), 2);

        let first = &response.description[0];
        assert_eq!(first.title, "The Matrix");
        assert_eq!(first.year, Some(1999));
        assert_eq!(first.rank, Some(32));
        assert_eq!(first.photo_width, Some(2100));
        assert_eq!(first.poster(), Some("https://m.media-amazon.com/images/M/matrix.jpg"));

        let second = &response.description[1];
        assert_eq!(second.year, None);
        assert_eq!(second.actors, "");
        assert_eq!(second.poster(), None);
    }

    #[test]
    fn test_missing_description_is_empty() {
        let response: SearchApiResponse =
            serde_json::from_str(r#"{"ok": false, "error_code": 404}"#).unwrap();
        assert!(!response.ok);
        assert!(response.description.is_empty());

        let response: SearchApiResponse =
            serde_json::from_str(r#"{"ok": true, "description": null}"#).unwrap();
        assert!(response.description.is_empty());
    }

    #[test]
    fn test_blank_poster_is_absent() {
        let record = SearchRecord {
            img_poster: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.poster(), None);
    }

    #[test]
    fn test_display_title_and_summary() {
        let record = SearchRecord {
            title: "Heat".to_string(),
            year: Some(1995),
            rank: Some(7),
            aka: "Heat (1995)".to_string(),
            actors: "Al Pacino, Robert De Niro".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_title(), "Heat 1995");
        assert_eq!(record.summary(), "Heat (1995) | 7 | Al Pacino, Robert De Niro");

        let untitled = SearchRecord {
            title: "Heat".to_string(),
            ..Default::default()
        };
        assert_eq!(untitled.display_title(), "Heat");
        assert_eq!(untitled.summary(), " |  | ");
    }
}
