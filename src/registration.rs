use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::StorageError, schema::registration_requests, validation,
};

/// Lifecycle of a registration request. Requests start out pending; once
/// approved or rejected no further transitions exist.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = StorageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(StorageError::Validation(format!(
                "unknown request status `{other}`"
            ))),
        }
    }
}

#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = registration_requests)]
pub struct RegistrationRequest {
    pub id: String,
    pub tg_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub status: String,
}

impl RegistrationRequest {
    pub fn status(&self) -> Result<RequestStatus, StorageError> {
        self.status.parse()
    }

    #[tracing::instrument(skip(conn))]
    pub fn create(
        tg_id: i64,
        first_name: &str,
        last_name: &str,
        middle_name: &str,
        conn: &mut SqliteConnection,
    ) -> Result<RegistrationRequest, StorageError> {
        validation::required("first_name", first_name)
            .map_err(StorageError::Validation)?;
        validation::required("last_name", last_name)
            .map_err(StorageError::Validation)?;
        validation::required("middle_name", middle_name)
            .map_err(StorageError::Validation)?;

        let request = RegistrationRequest {
            id: Uuid::now_v7().to_string(),
            tg_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            middle_name: middle_name.to_string(),
            status: RequestStatus::Pending.as_str().to_string(),
        };

        diesel::insert_into(registration_requests::table)
            .values(&request)
            .execute(conn)?;

        Ok(request)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        request_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<RegistrationRequest, StorageError> {
        registration_requests::table
            .find(request_id)
            .first::<RegistrationRequest>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<RegistrationRequest>, StorageError> {
        Ok(registration_requests::table.load(conn)?)
    }

    pub fn pending(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<RegistrationRequest>, StorageError> {
        Ok(registration_requests::table
            .filter(
                registration_requests::status
                    .eq(RequestStatus::Pending.as_str()),
            )
            .load(conn)?)
    }

    /// Approved and rejected are terminal, so the current status must be
    /// pending for the transition to go through.
    #[tracing::instrument(skip(conn))]
    pub fn set_status(
        request_id: &str,
        status: RequestStatus,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        conn.transaction::<_, StorageError, _>(|conn| {
            let current = Self::fetch(request_id, conn)?.status()?;
            if current != RequestStatus::Pending {
                return Err(StorageError::Validation(format!(
                    "request is already {current}; no further transitions"
                )));
            }

            diesel::update(registration_requests::table.find(request_id))
                .set(registration_requests::status.eq(status.as_str()))
                .execute(conn)?;

            Ok(())
        })
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        request_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(registration_requests::table.find(request_id))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }
}
