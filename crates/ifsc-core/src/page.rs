//! Offset-cursor page assembly.
//!
//! The assembler asks for one row more than the page can hold (the
//! lookahead row). Its presence means another page exists; it is dropped
//! before edges are built. The total count comes from an independent count
//! query over the same predicate and does not depend on limit or offset.

use serde::Serialize;

use crate::config::PaginationConfig;
use crate::cursor;
use crate::errors::Result;

/// One entity plus the cursor that addresses its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

/// Pagination metadata for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// A page of edges plus the size of the full (filtered) result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Build a page from an over-fetched slice.
    ///
    /// `raw` holds at most `limit + 1` rows read at `offset`. If it holds more
    /// than `limit`, the extra row is dropped and `has_next_page` is set. Each
    /// kept row at local index `i` gets the cursor for `offset + i`.
    pub fn from_overshot(mut raw: Vec<T>, limit: usize, offset: u64, total_count: u64) -> Self {
        let has_next_page = raw.len() > limit;
        if has_next_page {
            raw.truncate(limit);
        }

        let edges: Vec<Edge<T>> = raw
            .into_iter()
            .enumerate()
            .map(|(i, node)| Edge {
                node,
                cursor: cursor::encode(offset.saturating_add(i as u64)),
            })
            .collect();

        let page_info = PageInfo {
            has_next_page,
            has_previous_page: offset > 0,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        Page {
            edges,
            page_info,
            total_count,
        }
    }

    /// Iterate over the page's entities in order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Convert every node, keeping cursors and page metadata.
    pub fn try_map<U>(self, mut f: impl FnMut(T) -> Result<U>) -> Result<Page<U>> {
        let edges = self
            .edges
            .into_iter()
            .map(|e| {
                Ok(Edge {
                    node: f(e.node)?,
                    cursor: e.cursor,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Page {
            edges,
            page_info: self.page_info,
            total_count: self.total_count,
        })
    }
}

/// Builds pages under a fixed [`PaginationConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PageAssembler {
    config: PaginationConfig,
}

impl PageAssembler {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Assemble one page.
    ///
    /// `fetch(limit, offset)` must return rows in the query's stable order;
    /// it is called with `effective_limit + 1`. `count()` must apply the same
    /// predicate as `fetch`. Errors from either propagate unchanged.
    pub fn assemble<T, F, C>(
        &self,
        requested_size: Option<i64>,
        offset: u64,
        fetch: F,
        count: C,
    ) -> Result<Page<T>>
    where
        F: FnOnce(usize, u64) -> Result<Vec<T>>,
        C: FnOnce() -> Result<u64>,
    {
        let limit = self.config.effective_limit(requested_size);
        let raw = fetch(limit + 1, offset)?;
        let total_count = count()?;

        tracing::debug!(
            component = module_path!(),
            op = "page_assemble",
            limit = limit,
            offset = offset,
            fetched = raw.len(),
            total_count = total_count,
        );

        Ok(Page::from_overshot(raw, limit, offset, total_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ExError, ExErrorKind};

    fn rows(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    /// Simulates `LIMIT ? OFFSET ?` over `n` ordered rows.
    fn window(n: usize, limit: usize, offset: u64) -> Vec<usize> {
        rows(n).into_iter().skip(offset as usize).take(limit).collect()
    }

    #[test]
    fn test_from_overshot_trims_lookahead() {
        let page = Page::from_overshot(rows(3), 2, 0, 3);
        assert_eq!(page.len(), 2);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
        assert_eq!(page.page_info.start_cursor.as_deref(), Some("MA=="));
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("MQ=="));
    }

    #[test]
    fn test_cursors_encode_absolute_positions() {
        let page = Page::from_overshot(vec!['x', 'y'], 5, 40, 42);
        let cursors: Vec<u64> = page
            .edges
            .iter()
            .map(|e| cursor::decode(&e.cursor).unwrap())
            .collect();
        assert_eq!(cursors, vec![40, 41]);
        assert!(!page.page_info.has_next_page);
        assert!(page.page_info.has_previous_page);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<usize> = Page::from_overshot(Vec::new(), 10, 7, 0);
        assert!(page.is_empty());
        assert!(!page.page_info.has_next_page);
        assert!(page.page_info.has_previous_page);
        assert_eq!(page.page_info.start_cursor, None);
        assert_eq!(page.page_info.end_cursor, None);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_assemble_requests_one_extra_row() {
        let assembler = PageAssembler::new(PaginationConfig::new(20, 100).unwrap());
        let mut seen = None;
        let page = assembler
            .assemble(
                Some(5),
                10,
                |limit, offset| {
                    seen = Some((limit, offset));
                    Ok(window(30, limit, offset))
                },
                || Ok(30),
            )
            .unwrap();
        assert_eq!(seen, Some((6, 10)));
        assert_eq!(page.nodes().copied().collect::<Vec<_>>(), vec![10, 11, 12, 13, 14]);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.total_count, 30);
    }

    #[test]
    fn test_assemble_clamps_to_max_and_default() {
        let assembler = PageAssembler::new(PaginationConfig::new(3, 4).unwrap());
        let page = assembler
            .assemble(Some(50), 0, |l, o| Ok(window(10, l, o)), || Ok(10))
            .unwrap();
        assert_eq!(page.len(), 4);

        let page = assembler
            .assemble(Some(0), 0, |l, o| Ok(window(10, l, o)), || Ok(10))
            .unwrap();
        assert_eq!(page.len(), 3);
        assert!(page.page_info.has_next_page);

        let page = assembler
            .assemble(Some(-1), 0, |l, o| Ok(window(10, l, o)), || Ok(10))
            .unwrap();
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_exact_fit_has_no_next_page() {
        let assembler = PageAssembler::default();
        let page = assembler
            .assemble(Some(5), 0, |l, o| Ok(window(5, l, o)), || Ok(5))
            .unwrap();
        assert_eq!(page.len(), 5);
        assert!(!page.page_info.has_next_page);
    }

    #[test]
    fn test_fetch_error_propagates() {
        let assembler = PageAssembler::default();
        let result: Result<Page<usize>> = assembler.assemble(
            None,
            0,
            |_, _| Err(ExError::new(ExErrorKind::Persistence).with_message("db gone")),
            || Ok(0),
        );
        assert_eq!(result.unwrap_err().kind(), ExErrorKind::Persistence);
    }

    #[test]
    fn test_count_error_propagates() {
        let assembler = PageAssembler::default();
        let result = assembler.assemble(
            None,
            0,
            |l, o| Ok(window(3, l, o)),
            || Err(ExError::new(ExErrorKind::Persistence)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_try_map_keeps_cursors() {
        let page = Page::from_overshot(rows(2), 5, 3, 5);
        let mapped = page.clone().try_map(|n| Ok(n * 10)).unwrap();
        assert_eq!(mapped.nodes().copied().collect::<Vec<_>>(), vec![0, 10]);
        assert_eq!(mapped.page_info, page.page_info);
        assert_eq!(mapped.edges[1].cursor, page.edges[1].cursor);
    }

    #[test]
    fn test_serializes_connection_shape() {
        let page = Page::from_overshot(vec!["a"], 1, 0, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["pageInfo"]["hasNextPage"], false);
        assert_eq!(json["pageInfo"]["startCursor"], "MA==");
        assert_eq!(json["edges"][0]["node"], "a");
    }
}
