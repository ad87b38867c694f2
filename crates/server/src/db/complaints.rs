//! Complaint repository for database operations.
//!
//! Queries are built at runtime (the dashboard filter combinations make the
//! WHERE clause dynamic), so this module uses `sqlx::QueryBuilder` rather
//! than the compile-time macros.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use shakwa_core::{ComplaintId, ComplaintStatus, Email, Phone, TrackingToken};

use super::RepositoryError;
use crate::models::{Complaint, NewComplaint, StatusCounts};

/// Fixed dashboard page size.
pub const PAGE_SIZE: i64 = 10;

const COMPLAINT_COLUMNS: &str =
    "id, token, name, phone, email, title, content, status, created_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` complaint queries.
#[derive(Debug, sqlx::FromRow)]
struct ComplaintRow {
    id: i32,
    token: String,
    name: String,
    phone: String,
    email: Option<String>,
    title: String,
    content: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = RepositoryError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        let token = TrackingToken::parse(&row.token).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid token in database: {e}"))
        })?;
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;
        let email = row
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;
        let status: ComplaintStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: ComplaintId::new(row.id),
            token,
            name: row.name,
            phone,
            email,
            title: row.title,
            content: row.content,
            status,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Filtering & Pagination
// =============================================================================

/// Filter criteria for the dashboard complaint listing.
#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    /// Restrict to complaints with this exact status.
    pub status: Option<ComplaintStatus>,
    /// Case-insensitive substring match on title or content.
    pub query: Option<String>,
}

impl ComplaintFilter {
    /// Append the filter's WHERE conditions to a query.
    fn push_conditions(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if let Some(status) = self.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(q) = &self.query {
            let pattern = format!("%{q}%");
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR content ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

/// One page of filtered complaints, newest first.
#[derive(Debug)]
pub struct ComplaintPage {
    /// Complaints on this page.
    pub items: Vec<Complaint>,
    /// 1-based page number.
    pub page: i64,
    /// Total number of complaints matching the filter.
    pub total: i64,
    /// Total number of pages (at least 1).
    pub total_pages: i64,
}

impl ComplaintPage {
    /// Whether there is a page before this one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Compute the number of pages for `total` rows at `page_size` rows each.
fn page_count(total: i64, page_size: i64) -> i64 {
    // `i64::div_ceil` is still unstable (int_roundings); this is equivalent
    // for the non-negative row counts used here.
    let pages = (total + page_size - 1) / page_size;
    pages.max(1)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for complaint database operations.
pub struct ComplaintRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ComplaintRepository<'a> {
    /// Create a new complaint repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new complaint with status `waiting`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the token already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewComplaint) -> Result<Complaint, RepositoryError> {
        let row = sqlx::query_as::<_, ComplaintRow>(
            r"
            INSERT INTO complaint (token, name, phone, email, title, content)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, token, name, phone, email, title, content, status, created_at
            ",
        )
        .bind(new.token.as_str())
        .bind(&new.name)
        .bind(new.phone.as_str())
        .bind(new.email.as_ref().map(Email::as_str))
        .bind(&new.title)
        .bind(&new.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("token already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Look up a complaint by its exact tracking token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_token(
        &self,
        token: &TrackingToken,
    ) -> Result<Option<Complaint>, RepositoryError> {
        let row = sqlx::query_as::<_, ComplaintRow>(
            r"
            SELECT id, token, name, phone, email, title, content, status, created_at
            FROM complaint
            WHERE token = $1
            ",
        )
        .bind(token.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a complaint by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(
        &self,
        id: ComplaintId,
    ) -> Result<Option<Complaint>, RepositoryError> {
        let row = sqlx::query_as::<_, ComplaintRow>(
            r"
            SELECT id, token, name, phone, email, title, content, status, created_at
            FROM complaint
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Set a complaint's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the complaint doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE complaint
            SET status = $1
            WHERE id = $2
            ",
        )
        .bind(status.as_str())
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Aggregate complaint counts per status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn status_counts(&self) -> Result<StatusCounts, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r"
            SELECT status, COUNT(*)
            FROM complaint
            GROUP BY status
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut counts = StatusCounts::default();
        for (status, count) in rows {
            let status: ComplaintStatus = status.parse().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
            })?;
            counts.record(status, count);
        }

        Ok(counts)
    }

    /// Fetch one page of complaints matching `filter`, newest first.
    ///
    /// `page` is 1-based; values below 1 are clamped to the first page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn search(
        &self,
        filter: &ComplaintFilter,
        page: i64,
    ) -> Result<ComplaintPage, RepositoryError> {
        let page = page.max(1);

        let mut count_query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM complaint WHERE TRUE");
        filter.push_conditions(&mut count_query);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let mut list_query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaint WHERE TRUE"
        ));
        filter.push_conditions(&mut list_query);
        list_query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(PAGE_SIZE)
            .push(" OFFSET ")
            .push_bind((page - 1) * PAGE_SIZE);

        let rows: Vec<ComplaintRow> = list_query
            .build_query_as()
            .fetch_all(self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComplaintPage {
            items,
            page,
            total,
            total_pages: page_count(total, PAGE_SIZE),
        })
    }

    /// List all complaints, oldest first. Used by the spreadsheet export.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Complaint>, RepositoryError> {
        let rows = sqlx::query_as::<_, ComplaintRow>(
            r"
            SELECT id, token, name, phone, email, title, content, status, created_at
            FROM complaint
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(95, 10), 10);
    }

    #[test]
    fn test_complaint_page_navigation() {
        let page = ComplaintPage {
            items: vec![],
            page: 2,
            total: 25,
            total_pages: 3,
        };
        assert!(page.has_prev());
        assert!(page.has_next());

        let first = ComplaintPage {
            items: vec![],
            page: 1,
            total: 5,
            total_pages: 1,
        };
        assert!(!first.has_prev());
        assert!(!first.has_next());
    }

    #[test]
    fn test_row_conversion_rejects_bad_status() {
        let row = ComplaintRow {
            id: 1,
            token: "0123456789ab".to_string(),
            name: "Ali".to_string(),
            phone: "07701234567".to_string(),
            email: None,
            title: "t".to_string(),
            content: "c".to_string(),
            status: "bogus".to_string(),
            created_at: Utc::now(),
        };
        let result: Result<Complaint, _> = row.try_into();
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_row_conversion_valid() {
        let row = ComplaintRow {
            id: 7,
            token: "deadbeef0123".to_string(),
            name: "Ali".to_string(),
            phone: "+964770123456".to_string(),
            email: Some("ali@example.com".to_string()),
            title: "Water outage".to_string(),
            content: "No water for 3 days".to_string(),
            status: "in process".to_string(),
            created_at: Utc::now(),
        };
        let complaint: Complaint = row.try_into().expect("valid row");
        assert_eq!(complaint.id.as_i32(), 7);
        assert_eq!(complaint.status, ComplaintStatus::InProcess);
        assert_eq!(complaint.email.as_ref().map(Email::as_str), Some("ali@example.com"));
    }
}
