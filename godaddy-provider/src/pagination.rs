//! 分页游标
//!
//! GoDaddy 的两个列表接口使用不同的分页方式：
//! - DNS 记录：`limit` + `offset`（offset 从 1 开始，每页递增 `limit`）
//! - 域名列表：`limit` + `marker`（marker 为上一页最后一项的域名）
//!
//! 游标只在一次遍历调用内存在。每次请求前调用 `query()` 取参数，
//! 收到响应后调用 `advance()`；返回 [`PageStep::Done`] 时停止。

/// Outcome of feeding one page into a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    /// The page had items; request the next one.
    Continue,
    /// The page was empty or absent; iteration is over.
    Done,
}

/// Offset-based cursor for `GET /v1/domains/{domain}/records`.
#[derive(Debug, Clone)]
pub struct OffsetCursor {
    limit: u32,
    offset: u32,
}

impl OffsetCursor {
    /// First offset GoDaddy accepts.
    pub const FIRST_OFFSET: u32 = 1;

    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            offset: Self::FIRST_OFFSET,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Query parameters for the next request.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }

    /// Record the page just received.
    pub fn advance<T>(&mut self, page: Option<&[T]>) -> PageStep {
        match page {
            Some(items) if !items.is_empty() => {
                self.offset = self.offset.saturating_add(self.limit);
                PageStep::Continue
            }
            _ => PageStep::Done,
        }
    }
}

/// Marker-based cursor for `GET /v1/domains`.
#[derive(Debug, Clone)]
pub struct MarkerCursor {
    limit: u32,
    marker: Option<String>,
}

impl MarkerCursor {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            marker: None,
        }
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Query parameters for the next request. The first request carries no marker.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string())];
        if let Some(marker) = &self.marker {
            query.push(("marker", marker.clone()));
        }
        query
    }

    /// Record the page just received; `marker_of` extracts an item's marker.
    pub fn advance<T>(&mut self, page: Option<&[T]>, marker_of: impl Fn(&T) -> &str) -> PageStep {
        match page.and_then(<[T]>::last) {
            Some(last) => {
                self.marker = Some(marker_of(last).to_string());
                PageStep::Continue
            }
            None => PageStep::Done,
        }
    }
}
