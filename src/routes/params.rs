use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

// Query structs keep `page`/`per_page` inline: `serde(flatten)` breaks
// non-string fields under `serde_urlencoded`.

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Only active (`true`) or inactive (`false`) products.
    pub active: Option<bool>,
    /// Case-insensitive name search.
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CashRegisterListQuery {
    pub page: Option<i64>,
    #[serde(rename = "per_page")]
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SaleListQuery {
    pub page: Option<i64>,
    #[serde(rename = "per_page")]
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub user_id: Option<Uuid>,
    pub cash_register_id: Option<Uuid>,
    pub payment_method: Option<String>,
    /// Inclusive lower bound on creation time (RFC 3339 or YYYY-MM-DD).
    pub start_date: Option<String>,
    /// Inclusive upper bound on creation time (RFC 3339 or YYYY-MM-DD).
    pub end_date: Option<String>,
}

impl UserListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl ProductListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl CashRegisterListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Bound of a creation-date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// `created_at >= t`
    From(DateTime<Utc>),
    /// `created_at <= t`
    Through(DateTime<Utc>),
    /// `created_at < t`, used when an end date names a whole day.
    Before(DateTime<Utc>),
}

impl SaleListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn date_bounds(&self) -> AppResult<Vec<DateBound>> {
        let mut bounds = Vec::new();
        if let Some(raw) = non_empty(&self.start_date) {
            let bound = match parse_timestamp(raw) {
                Some(at) => DateBound::From(at),
                None => DateBound::From(day_start(parse_day("startDate", raw)?)),
            };
            bounds.push(bound);
        }
        if let Some(raw) = non_empty(&self.end_date) {
            let bound = match parse_timestamp(raw) {
                Some(at) => DateBound::Through(at),
                None => {
                    let day = parse_day("endDate", raw)?;
                    DateBound::Before(day_start(day) + Duration::days(1))
                }
            };
            bounds.push(bound);
        }
        Ok(bounds)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_day(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!(
            "{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date"
        ))
    })
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pagination_is_clamped() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(p.normalize(), (1, 100, 0));
        let p = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(p.normalize(), (3, 20, 40));
    }

    #[test]
    fn bare_dates_cover_whole_days() {
        let query = SaleListQuery {
            start_date: Some("2024-03-01".into()),
            end_date: Some("2024-03-31".into()),
            ..Default::default()
        };
        let bounds = query.date_bounds().unwrap();
        assert_eq!(
            bounds,
            vec![
                DateBound::From(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
                DateBound::Before(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
            ]
        );
    }

    #[test]
    fn timestamps_are_inclusive() {
        let query = SaleListQuery {
            end_date: Some("2024-03-31T18:00:00-03:00".into()),
            ..Default::default()
        };
        assert_eq!(
            query.date_bounds().unwrap(),
            vec![DateBound::Through(
                Utc.with_ymd_and_hms(2024, 3, 31, 21, 0, 0).unwrap()
            )]
        );
    }

    #[test]
    fn malformed_dates_are_bad_requests() {
        let query = SaleListQuery {
            start_date: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(matches!(query.date_bounds(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_dates_are_ignored() {
        let query = SaleListQuery {
            start_date: Some("  ".into()),
            ..Default::default()
        };
        assert!(query.date_bounds().unwrap().is_empty());
    }
}
