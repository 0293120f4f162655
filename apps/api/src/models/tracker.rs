#![allow(dead_code)]

//! Tracker rows: roles, jobs, applications.
//!
//! Lifecycle fields (`status`, `response`) stay string-backed — state
//! transitions are owned by the CRUD layer, not this core, which only
//! reads these rows while assembling documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: i32,
    pub lane: String,
    pub core_skills: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub company: String,
    pub title: String,
    pub posting_url: Option<String>,
    pub required_skills: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub status: String,
    pub fit_score: Option<i32>,
    pub notes: Option<String>,
    pub role_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i32,
    pub job_id: i32,
    pub date_sent: Option<NaiveDate>,
    pub contact: Option<String>,
    pub contact_address: Option<String>,
    pub response: Option<String>,
    pub next_action_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
