//! List-query value types: filtering, sorting, offset pagination.

/// Filter applied to the public listing. `search` matches title, content and
/// category case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Views,
    Likes,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort key and direction parsed from the `-createdAt` style query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for Sort {
    /// Newest first.
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl Sort {
    /// Parses e.g. `-createdAt`, `views`, `created_at`. A leading `-` means
    /// descending. Unknown keys fall back to the default sort.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (key, order) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortOrder::Desc),
            None => (raw, SortOrder::Asc),
        };

        let key = match key.replace('_', "").to_lowercase().as_str() {
            "createdat" => SortKey::CreatedAt,
            "updatedat" => SortKey::UpdatedAt,
            "views" => SortKey::Views,
            "likes" => SortKey::Likes,
            "title" => SortKey::Title,
            _ => return Sort::default(),
        };

        Sort { key, order }
    }
}

/// Offset pagination request: `skip = (page - 1) * limit`.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub sort: Sort,
}

impl PageRequest {
    /// Builds a request from raw query values. Zero or missing page/limit
    /// fall back to defaults, mirroring how the query string is parsed.
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64, sort: Option<&str>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit.filter(|l| *l > 0).unwrap_or(default_limit),
            sort: sort.map(Sort::parse).unwrap_or_default(),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descending_camel_case() {
        let sort = Sort::parse("-createdAt");
        assert_eq!(sort.key, SortKey::CreatedAt);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn parses_ascending_snake_case() {
        let sort = Sort::parse("created_at");
        assert_eq!(sort.key, SortKey::CreatedAt);
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        assert_eq!(Sort::parse("-__proto__"), Sort::default());
        assert_eq!(Sort::parse(""), Sort::default());
    }

    #[test]
    fn page_request_defaults_and_offset() {
        let page = PageRequest::new(None, None, 12, None);
        assert_eq!((page.page, page.limit, page.offset()), (1, 12, 0));

        let page = PageRequest::new(Some(3), Some(10), 12, Some("-views"));
        assert_eq!(page.offset(), 20);
        assert_eq!(page.sort.key, SortKey::Views);

        // zero is treated as "not provided"
        let page = PageRequest::new(Some(0), Some(0), 12, None);
        assert_eq!((page.page, page.limit), (1, 12));
    }
}
