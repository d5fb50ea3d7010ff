use log::{info, trace};
use reqwest::Url;
use serde::{de::IgnoredAny, Deserialize};

use crate::{Error, ErrorKind};

use super::Client;

/// Builds the search URL by adding the `search` query parameter to `base_url`.
///
/// The query is form encoded so spaces become `+` and reserved characters are percent-encoded.
pub(crate) fn search_url(base_url: &str, query: &str) -> Result<Url, Error> {
    Url::parse_with_params(base_url, &[("search", query)]).map_err(|e| {
        Error::wrap_with(
            ErrorKind::InvalidInput,
            e,
            format!("'{base_url}' is not a valid search endpoint"),
        )
    })
}

/// Searches the Gutendex API for `query` and returns the decoded results in API order.
pub(crate) fn search<C: Client>(base_url: &str, query: &str) -> Result<Vec<BookRecord>, Error> {
    let url = search_url(base_url, query)?;
    info!("Searching for '{query}' using the Gutendex API");

    let client = C::default();
    let text = client.get_text(url.as_str())?;

    trace!("Request was successful");

    let SearchResults { results } = decode(&text)?;
    trace!("Search returned {} result(s)", results.len());
    Ok(results)
}

/// Deserializes a Gutendex response body.
pub(crate) fn decode(json: &str) -> Result<SearchResults, Error> {
    serde_json::from_str(json).map_err(|e| {
        Error::wrap_with(
            ErrorKind::Deserialize,
            e,
            "Response was not a valid search result",
        )
    })
}

/// The envelope wrapping a page of search results.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct SearchResults {
    #[serde(default)]
    pub(crate) results: Vec<BookRecord>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct BookRecord {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) authors: Vec<AuthorRecord>,
    #[serde(default)]
    pub(crate) languages: Vec<String>,
    #[serde(default)]
    download_count: Option<DownloadCount>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct AuthorRecord {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    birth_year: Option<Year>,
    #[serde(default)]
    death_year: Option<Year>,
}

/// A year as found in the source data, which is usually a number but is not guaranteed to be.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(untagged)]
enum Year {
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

impl Year {
    fn resolve(&self) -> Option<i32> {
        match self {
            Self::Number(n) => i32::try_from(*n).ok(),
            Self::Text(s) => s.parse().ok(),
            Self::Other(_) => None,
        }
    }
}

/// A download count, reported as an integer by Gutendex but accepted as any JSON number.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(untagged)]
enum DownloadCount {
    Integer(u64),
    Float(f64),
    Other(IgnoredAny),
}

impl DownloadCount {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resolve(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            // `as` saturates at u64::MAX and drops the fraction
            Self::Float(f) if f.is_finite() && *f >= 0.0 => Some(*f as u64),
            Self::Float(_) | Self::Other(_) => None,
        }
    }
}

impl BookRecord {
    /// Download count, `None` when missing, negative or not a number.
    pub(crate) fn download_count(&self) -> Option<u64> {
        self.download_count.as_ref().and_then(DownloadCount::resolve)
    }
}

impl AuthorRecord {
    /// Year of birth, `None` when missing or not an integer.
    pub(crate) fn birth_year(&self) -> Option<i32> {
        self.birth_year.as_ref().and_then(Year::resolve)
    }

    /// Year of death, `None` when missing or not an integer.
    pub(crate) fn death_year(&self) -> Option<i32> {
        self.death_year.as_ref().and_then(Year::resolve)
    }
}
