//! Relay-style cursor pagination for the feed and audit log.
//!
//! Cursors are base64-encoded V7 UUIDs. Because V7 IDs are time-ordered,
//! the row ID alone is a stable sort key and no compound cursor is needed.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use juniper::GraphQLObject;
use uuid::Uuid;

/// Opaque pagination cursor (base64-encoded UUID).
#[derive(Debug, Clone)]
pub struct Cursor(Uuid);

impl Cursor {
    pub fn new(id: Uuid) -> Self {
        Cursor(id)
    }

    /// Encode the cursor as a base64 string.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    /// Encode a UUID directly to a cursor string.
    pub fn encode_uuid(id: Uuid) -> String {
        Cursor::new(id).encode()
    }

    /// Decode a cursor string back to a Cursor.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .context("Invalid cursor: not valid base64")?;
        let uuid = Uuid::from_slice(&bytes).context("Invalid cursor: not a valid UUID")?;
        Ok(Cursor(uuid))
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

/// Page information for cursor-based pagination.
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "Information about pagination in a connection")]
pub struct PageInfo {
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
    /// When paginating backwards, are there more items?
    pub has_previous_page: bool,
    /// Cursor of the first edge in the page.
    pub start_cursor: Option<String>,
    /// Cursor of the last edge in the page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    pub fn empty() -> Self {
        PageInfo {
            has_next_page: false,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: None,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::empty()
    }
}

/// Direction of pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationDirection {
    Forward,
    Backward,
}

/// Raw pagination arguments as they arrive from GraphQL.
///
/// Per the Relay spec, callers use either first/after (forward) or
/// last/before (backward), never both.
#[derive(Debug, Clone, Default)]
pub struct PaginationArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

impl PaginationArgs {
    pub fn forward(first: i32, after: Option<String>) -> Self {
        PaginationArgs {
            first: Some(first),
            after,
            last: None,
            before: None,
        }
    }

    /// Validate, apply defaults (limit 25, clamped 1-100), decode the cursor.
    pub fn validate(&self) -> Result<ValidatedPaginationArgs, &'static str> {
        if (self.first.is_some() || self.after.is_some())
            && (self.last.is_some() || self.before.is_some())
        {
            return Err("Cannot use first/after with last/before");
        }

        let direction = if self.last.is_some() || self.before.is_some() {
            PaginationDirection::Backward
        } else {
            PaginationDirection::Forward
        };

        let limit = self.first.or(self.last).unwrap_or(25).clamp(1, 100);

        let cursor_str = match direction {
            PaginationDirection::Forward => self.after.as_ref(),
            PaginationDirection::Backward => self.before.as_ref(),
        };

        let cursor = cursor_str
            .map(|c| Cursor::decode(c))
            .transpose()
            .map_err(|_| "Invalid cursor")?
            .map(|c| c.into_uuid());

        Ok(ValidatedPaginationArgs {
            limit,
            cursor,
            direction,
        })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone)]
pub struct ValidatedPaginationArgs {
    pub limit: i32,
    pub cursor: Option<Uuid>,
    pub direction: PaginationDirection,
}

impl ValidatedPaginationArgs {
    /// SQL LIMIT value: limit + 1 so has_more can be detected.
    pub fn fetch_limit(&self) -> i64 {
        (self.limit + 1) as i64
    }

    pub fn is_forward(&self) -> bool {
        self.direction == PaginationDirection::Forward
    }
}

/// Build PageInfo from pagination results.
pub fn build_page_info(
    has_more: bool,
    args: &ValidatedPaginationArgs,
    start_cursor: Option<String>,
    end_cursor: Option<String>,
) -> PageInfo {
    match args.direction {
        PaginationDirection::Forward => PageInfo {
            has_next_page: has_more,
            has_previous_page: args.cursor.is_some(),
            start_cursor,
            end_cursor,
        },
        PaginationDirection::Backward => PageInfo {
            has_next_page: args.cursor.is_some(),
            has_previous_page: has_more,
            start_cursor,
            end_cursor,
        },
    }
}

/// Trim a limit+1 result set down to the page and report whether more exist.
pub fn trim_results<T>(results: Vec<T>, limit: i32) -> (Vec<T>, bool) {
    let has_more = results.len() > limit as usize;
    let results = if has_more {
        results.into_iter().take(limit as usize).collect()
    } else {
        results
    };
    (results, has_more)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_roundtrip() {
        let id = Uuid::new_v4();
        let encoded = Cursor::encode_uuid(id);
        let decoded = Cursor::decode(&encoded).unwrap();
        assert_eq!(id, decoded.into_uuid());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Cursor::decode("not base64!!").is_err());
        assert!(Cursor::decode(&URL_SAFE_NO_PAD.encode(b"short")).is_err());
    }

    #[test]
    fn test_validate_defaults() {
        let validated = PaginationArgs::default().validate().unwrap();
        assert_eq!(validated.limit, 25);
        assert!(validated.cursor.is_none());
        assert_eq!(validated.direction, PaginationDirection::Forward);
    }

    #[test]
    fn test_validate_clamps_limit() {
        let validated = PaginationArgs::forward(500, None).validate().unwrap();
        assert_eq!(validated.limit, 100);

        let validated = PaginationArgs::forward(0, None).validate().unwrap();
        assert_eq!(validated.limit, 1);
    }

    #[test]
    fn test_validate_rejects_mixed_directions() {
        let args = PaginationArgs {
            first: Some(10),
            after: None,
            last: Some(5),
            before: None,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_decodes_cursor() {
        let id = Uuid::new_v4();
        let args = PaginationArgs::forward(10, Some(Cursor::encode_uuid(id)));
        let validated = args.validate().unwrap();
        assert_eq!(validated.cursor, Some(id));
    }

    #[test]
    fn test_trim_results() {
        let (page, has_more) = trim_results((1..=11).collect::<Vec<_>>(), 10);
        assert_eq!(page.len(), 10);
        assert!(has_more);

        let (page, has_more) = trim_results((1..=3).collect::<Vec<_>>(), 10);
        assert_eq!(page.len(), 3);
        assert!(!has_more);
    }
}
