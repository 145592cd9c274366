//! Memo domain types matching the MemoApp REST API

pub mod service;

pub use service::MemoService;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Memo priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Wire value used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Next priority in the Low -> Medium -> High cycle
    pub fn next(&self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A memo as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body for creating a memo
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Body for updating a memo
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Body for updating a single memo's priority
#[derive(Debug, Clone, Serialize)]
pub struct PriorityUpdateRequest {
    pub priority: Priority,
}

/// Body for updating the priority of several memos at once
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPriorityUpdateRequest {
    pub memo_ids: Vec<i64>,
    pub priority: Priority,
}

/// Aggregate priority statistics from the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityStats {
    pub priority_counts: HashMap<String, i64>,
    pub total_memos: i64,
    pub most_common_priority: String,
}

impl PriorityStats {
    pub fn count(&self, key: &str) -> i64 {
        self.priority_counts.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_wire_format() {
        assert_eq!(serde_json::to_value(Priority::High).unwrap(), json!("HIGH"));
        assert_eq!(serde_json::to_value(Priority::Low).unwrap(), json!("LOW"));

        let parsed: Priority = serde_json::from_value(json!("MEDIUM")).unwrap();
        assert_eq!(parsed, Priority::Medium);
    }

    #[test]
    fn test_priority_cycle() {
        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::Medium.next(), Priority::High);
        assert_eq!(Priority::High.next(), Priority::Low);
    }

    #[test]
    fn test_memo_deserializes_backend_shape() {
        let memo: Memo = serde_json::from_value(json!({
            "id": 1,
            "title": "Groceries",
            "content": "Milk, eggs",
            "priority": "HIGH",
            "createdAt": "2024-05-01T10:30:00",
            "updatedAt": "2024-05-02T08:00:00"
        }))
        .unwrap();

        assert_eq!(memo.id, Some(1));
        assert_eq!(memo.priority, Some(Priority::High));
        assert!(memo.created_at.is_some());
    }

    #[test]
    fn test_bulk_request_uses_camel_case() {
        let body = BulkPriorityUpdateRequest {
            memo_ids: vec![1, 2],
            priority: Priority::Medium,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"memoIds": [1, 2], "priority": "MEDIUM"})
        );
    }

    #[test]
    fn test_stats_missing_bucket_counts_zero() {
        let stats: PriorityStats = serde_json::from_value(json!({
            "priorityCounts": {"HIGH": 3, "MEDIUM": 1, "LOW": 0},
            "totalMemos": 4,
            "mostCommonPriority": "HIGH"
        }))
        .unwrap();

        assert_eq!(stats.count("HIGH"), 3);
        assert_eq!(stats.count("NONE"), 0);
    }
}
