//! Logic the dashboard screens run over fetched data.
//!
//! Order filtering by status and date, order statistics, QR-code order
//! lookup and amount formatting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use storedash_core::{CurrencyCode, Order, OrderId, OrderStatus, Price};
use url::Url;

use crate::error::ValidationError;

/// Query parameters that carry the order reference in a QR-code URL.
const ORDER_QUERY_KEYS: [&str; 2] = ["orderId", "id"];

/// Prefixes printed in front of the reference on packing slips.
const ORDER_CODE_PREFIXES: [&str; 3] = ["ORDER:", "ORDER-", "#"];

// =============================================================================
// Filtering
// =============================================================================

/// Status and creation-date filter for the orders screen.
///
/// Date bounds are inclusive and compared against the UTC date of
/// `created_at`. Orders without `created_at` never match a date bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl OrderFilter {
    /// Build a filter, rejecting a range that ends before it starts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Invalid` if `from` is after `to`.
    pub fn new(
        status: Option<OrderStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(ValidationError::Invalid {
                field: "from",
                message: format!("{from} is after {to}"),
            });
        }
        Ok(Self { status, from, to })
    }

    /// Whether no criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.from.is_none() && self.to.is_none()
    }

    /// Whether `order` passes every set criterion.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }

        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(created) = order.created_at.map(|at| at.date_naive()) else {
            return false;
        };
        self.from.is_none_or(|from| created >= from) && self.to.is_none_or(|to| created <= to)
    }

    /// The orders that pass the filter, in their original order.
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Number of orders per status.
pub fn status_counts<'a>(orders: impl IntoIterator<Item = &'a Order>) -> BTreeMap<OrderStatus, usize> {
    let mut counts = BTreeMap::new();
    for order in orders {
        *counts.entry(order.status).or_insert(0) += 1;
    }
    counts
}

/// Sum of `total_amount` over `orders`.
pub fn revenue<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Decimal {
    orders.into_iter().map(|order| order.total_amount).sum()
}

// =============================================================================
// QR-code lookup
// =============================================================================

/// An order reference decoded from a scanned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderReference {
    /// Numeric backend ID.
    Id(OrderId),
    /// Human-facing order number.
    Number(String),
}

impl std::fmt::Display for OrderReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Number(number) => f.write_str(number),
        }
    }
}

/// Decode a scanned QR payload into an order reference.
///
/// - An `http(s)` URL yields its `orderId` or `id` query parameter, else its
///   last non-empty path segment.
/// - Anything else is trimmed and stripped of an `ORDER:`, `ORDER-` or `#`
///   prefix (case-insensitive).
///
/// A positive integer becomes [`OrderReference::Id`], anything else
/// [`OrderReference::Number`].
///
/// # Errors
///
/// Returns `ValidationError` if the payload holds no reference.
pub fn parse_order_code(payload: &str) -> Result<OrderReference, ValidationError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field: "orderCode" });
    }

    let code = match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            reference_from_url(&url).ok_or_else(|| ValidationError::Invalid {
                field: "orderCode",
                message: format!("no order reference in '{trimmed}'"),
            })?
        }
        _ => strip_order_prefix(trimmed).to_string(),
    };

    if code.is_empty() {
        return Err(ValidationError::Required { field: "orderCode" });
    }

    Ok(match code.parse::<i64>() {
        Ok(id) if id > 0 => OrderReference::Id(OrderId::new(id)),
        _ => OrderReference::Number(code),
    })
}

fn reference_from_url(url: &Url) -> Option<String> {
    let from_query = ORDER_QUERY_KEYS.iter().find_map(|key| {
        url.query_pairs()
            .find(|(name, value)| name == key && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_string())
    });

    from_query.or_else(|| {
        url.path_segments()?
            .filter(|segment| !segment.is_empty())
            .next_back()
            .map(|segment| {
                urlencoding::decode(segment)
                    .map_or_else(|_| segment.to_string(), |decoded| decoded.into_owned())
            })
    })
}

fn strip_order_prefix(code: &str) -> &str {
    ORDER_CODE_PREFIXES
        .iter()
        .find_map(|prefix| {
            code.get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .and_then(|_| code.get(prefix.len()..))
        })
        .unwrap_or(code)
        .trim()
}

// =============================================================================
// Formatting
// =============================================================================

/// Format an amount for display: `$1,234.50`.
#[must_use]
pub fn format_amount(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).to_string()
}
