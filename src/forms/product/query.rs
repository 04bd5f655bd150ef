use std::collections::HashMap;

// Reserved control keys never become equality filters.
const CONTROL_KEYS: [&str; 5] = ["page", "sort", "limit", "fields", "search"];

// Product attributes an equality filter may target.
const FILTER_FIELDS: [&str; 8] = [
    "name",
    "description",
    "category",
    "location",
    "stock",
    "price",
    "rating",
    "createdBy",
];

const SORT_FIELDS: [&str; 8] = [
    "name",
    "price",
    "rating",
    "stock",
    "category",
    "location",
    "createdAt",
    "updatedAt",
];

const DEFAULT_LIMIT: i64 = 20;

/// A single listing filter clause. The clause list is the whole contract
/// between the request and the storage layer; translation into the store's
/// native query happens in `db::product` only.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    Equals { field: String, value: String },
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    TextSearch { term: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortField {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortSpec {
    /// Store-computed full-text relevance, best match first.
    Relevance,
    Fields(Vec<SortField>),
}

impl SortSpec {
    fn created_at_desc() -> Self {
        SortSpec::Fields(vec![SortField {
            field: "createdAt".to_string(),
            descending: true,
        }])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub filter: Vec<FilterClause>,
    pub sort: SortSpec,
    pub page: i64,
    pub limit: i64,
}

impl ListingQuery {
    /// Translate a flat set of raw request parameters into filter clauses,
    /// a sort specification and a page/limit pair.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut filter = Vec::new();

        // Plain equality filters, in stable field order.
        let mut fields: Vec<&String> = params
            .keys()
            .filter(|key| !CONTROL_KEYS.contains(&key.as_str()))
            .filter(|key| key.as_str() != "minPrice" && key.as_str() != "maxPrice")
            .collect();
        fields.sort();

        for key in fields {
            if FILTER_FIELDS.contains(&key.as_str()) {
                filter.push(FilterClause::Equals {
                    field: key.clone(),
                    value: params[key].clone(),
                });
            } else {
                tracing::debug!("dropping unknown filter field {:?}", key);
            }
        }

        // Price bounds are independent and strictly parsed: "0" is a valid
        // bound, a non-numeric value contributes nothing.
        let min = params.get("minPrice").and_then(|raw| raw.parse::<f64>().ok());
        let max = params.get("maxPrice").and_then(|raw| raw.parse::<f64>().ok());
        if min.is_some() || max.is_some() {
            filter.push(FilterClause::Range {
                field: "price".to_string(),
                min,
                max,
            });
        }

        let search = params
            .get("search")
            .map(String::as_str)
            .filter(|term| !term.is_empty());
        if let Some(term) = search {
            filter.push(FilterClause::TextSearch {
                term: term.to_string(),
            });
        }

        let sort = match params.get("sort").map(String::as_str).filter(|s| !s.is_empty()) {
            Some(raw) => Self::parse_sort(raw, search.is_some()),
            None if search.is_some() => SortSpec::Relevance,
            None => SortSpec::created_at_desc(),
        };

        let page = positive_int(params.get("page"), 1);
        let limit = positive_int(params.get("limit"), DEFAULT_LIMIT);

        ListingQuery {
            filter,
            sort,
            page,
            limit,
        }
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn search_term(&self) -> Option<&str> {
        self.filter.iter().find_map(|clause| match clause {
            FilterClause::TextSearch { term } => Some(term.as_str()),
            _ => None,
        })
    }

    fn parse_sort(raw: &str, has_search: bool) -> SortSpec {
        let mut fields = Vec::new();

        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (name, descending) = match part.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (part, false),
            };

            if name == "score" {
                // The relevance score has no meaning without a search clause.
                if has_search {
                    return SortSpec::Relevance;
                }
                continue;
            }

            if SORT_FIELDS.contains(&name) {
                fields.push(SortField {
                    field: name.to_string(),
                    descending,
                });
            } else {
                tracing::debug!("dropping unknown sort field {:?}", name);
            }
        }

        if fields.is_empty() {
            SortSpec::created_at_desc()
        } else {
            SortSpec::Fields(fields)
        }
    }
}

fn positive_int(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|n| *n != 0)
        .unwrap_or(default)
        .max(1)
}
