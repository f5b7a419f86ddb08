//! Shared query infrastructure: the [`Query`] trait, pagination parameters,
//! and [`SortDirection`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders.
pub trait Query {
    /// Parameters contributed by this query, in the order they are sent.
    fn query_pairs(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_pairs(&mut url, &self.query_pairs());
        url
    }
}

/// Form-encodes `pairs` onto `url`. An empty list leaves the URL untouched,
/// so no bare `?` is added.
pub(crate) fn append_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut serializer = url.query_pairs_mut();
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
}

/// No parameters.
impl Query for () {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Sort order for listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order. This is the API default.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// `page` / `per_page` parameters of page-number listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Results per page. `None` uses the API default.
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn new(page: u32, per_page: Option<u32>) -> Self {
        Self { page, per_page }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
        }
    }
}

impl Query for PageQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.to_string())];
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        pairs
    }
}

/// `per_page` / `cursor` parameters of cursor listings. The cursor is
/// omitted on the first request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorQuery {
    pub cursor: Option<String>,
    pub per_page: Option<u32>,
}

impl CursorQuery {
    pub fn new(cursor: Option<String>, per_page: Option<u32>) -> Self {
        Self { cursor, per_page }
    }
}

impl Query for CursorQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(cursor) = self.cursor.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("cursor".to_string(), cursor.to_string()));
        }
        pairs
    }
}
