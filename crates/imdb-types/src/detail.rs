//! Detail API payload
//!
//! The detail endpoint returns a large GraphQL-shaped document. Only the
//! parts the caption formatter reads are modelled here; everything else is
//! ignored during deserialization. Every field may be missing or `null`.

use serde::{Deserialize, Serialize};

use crate::search::{SearchRecord, null_as_default};

/// Document returned by `GET <api>/?tt=<title id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailDocument {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub short: Option<ShortInfo>,
    #[serde(default)]
    pub main: Option<MainInfo>,
    /// The search record echoed back by the API
    #[serde(default)]
    pub fake: Option<SearchRecord>,
}

/// schema.org-style summary block (`short`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortInfo {
    /// schema.org type, e.g. `Movie` or `TVSeries`
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub aggregate_rating: Option<AggregateRating>,
    #[serde(default)]
    pub content_rating: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: Vec<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    /// ISO-8601 duration such as `PT2H16M`
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    #[serde(default)]
    pub rating_value: Option<f64>,
    #[serde(default)]
    pub best_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
}

/// Title page data block (`main`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainInfo {
    #[serde(default)]
    pub is_adult: Option<bool>,
    #[serde(default)]
    pub runtime: Option<Runtime>,
    #[serde(default)]
    pub spoken_languages: Option<SpokenLanguages>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub directors: Vec<CreditGroup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub writers: Vec<CreditGroup>,
    #[serde(default)]
    pub cast: Option<CastConnection>,
}

impl MainInfo {
    pub fn runtime_seconds(&self) -> Option<u64> {
        self.runtime.as_ref().and_then(|r| r.seconds)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.spoken_languages
            .iter()
            .flat_map(|l| l.spoken_languages.iter())
            .filter_map(|l| l.text.as_deref())
    }

    /// Credited people of the first director group.
    pub fn director_names(&self) -> Vec<Option<&PersonName>> {
        first_group_names(&self.directors)
    }

    /// Credited people of the first writer group.
    pub fn writer_names(&self) -> Vec<Option<&PersonName>> {
        first_group_names(&self.writers)
    }

    /// Cast members in billing order.
    pub fn cast_names(&self) -> Vec<Option<&PersonName>> {
        self.cast
            .iter()
            .flat_map(|c| c.edges.iter())
            .map(|edge| edge.node.as_ref().and_then(|n| n.name.as_ref()))
            .collect()
    }
}

fn first_group_names(groups: &[CreditGroup]) -> Vec<Option<&PersonName>> {
    groups
        .first()
        .map(|g| g.credits.iter().map(|c| c.name.as_ref()).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Runtime {
    #[serde(default)]
    pub seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenLanguages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub spoken_languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A credit category (directors, writers) with its people
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Vec<Credit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    #[serde(default)]
    pub name: Option<PersonName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastConnection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<CastEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastEdge {
    #[serde(default)]
    pub node: Option<CastNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CastNode {
    #[serde(default)]
    pub name: Option<PersonName>,
}

/// A person reference (`nm…` id plus display name)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub name_text: Option<TextValue>,
}

impl PersonName {
    pub fn display(&self) -> Option<&str> {
        self.name_text.as_ref().and_then(|t| t.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: Option<String>,
}
