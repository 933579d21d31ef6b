use serde::Serialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("resource title cannot be empty")]
    EmptyTitle,

    #[error("invalid resource URL: {0}")]
    InvalidUrl(String),
}

/// An external reading or listening resource shown in the library scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryResource {
    title: String,
    description: String,
    url: Url,
    category: String,
}

impl LibraryResource {
    /// # Errors
    ///
    /// Returns `ResourceError` if the title is blank or `url` does not parse.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: &str,
        category: impl Into<String>,
    ) -> Result<Self, ResourceError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ResourceError::EmptyTitle);
        }
        let url = Url::parse(url.trim()).map_err(|_| ResourceError::InvalidUrl(url.to_string()))?;

        Ok(Self {
            title,
            description: description.into().trim().to_string(),
            url,
            category: category.into().trim().to_string(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_url() {
        let err = LibraryResource::new("BSE", "guidelines", "bsecho.org", "Guidelines").unwrap_err();
        assert_eq!(err, ResourceError::InvalidUrl("bsecho.org".into()));
    }

    #[test]
    fn keeps_parsed_url() {
        let res =
            LibraryResource::new("BSE", "guidelines", "https://www.bsecho.org/", "Guidelines").unwrap();
        assert_eq!(res.url().host_str(), Some("www.bsecho.org"));
    }
}
