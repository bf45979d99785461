use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::pagination::{is_last, total_pages};
use crate::domains::member::models::Member;

/// Member projection - the public API representation of a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for MemberData {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            date_of_birth: member.date_of_birth,
            email: member.email,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// One page of member projections with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedMemberData {
    pub content: Vec<MemberData>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub last: bool,
}

impl PagedMemberData {
    pub fn new(content: Vec<MemberData>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = total_pages(total_elements, size);
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last: is_last(page, total_pages),
        }
    }
}
