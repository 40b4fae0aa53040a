use serde::{Deserialize, Serialize};

/// Upper bound on `VisitLog::visitors`; older records are dropped first.
pub const MAX_VISITORS: usize = 1000;

/// Referrer stored when the request carried no `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub timestamp: String,
    pub user_agent: String,
    #[serde(alias = "referer")]
    pub referrer: String,
    #[serde(alias = "ip")]
    pub source_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisitLog {
    #[serde(default)]
    pub total_visits: u64,
    #[serde(default)]
    pub visitors: Vec<VisitRecord>,
}

impl VisitLog {
    /// Counts one visit and appends its record, evicting the oldest entries
    /// once the history is over `MAX_VISITORS`.
    pub fn record(&mut self, record: VisitRecord) {
        self.total_visits = self.total_visits.saturating_add(1);
        self.visitors.push(record);
        if self.visitors.len() > MAX_VISITORS {
            let excess = self.visitors.len() - MAX_VISITORS;
            self.visitors.drain(..excess);
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl VisitResponse {
    pub fn recorded(count: u64) -> Self {
        Self {
            success: true,
            count: Some(count),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            count: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(n: usize) -> VisitRecord {
        VisitRecord {
            timestamp: format!("2026-01-05T10:00:00.{n:03}Z"),
            user_agent: format!("agent-{n}"),
            referrer: DIRECT_REFERRER.to_string(),
            source_address: UNKNOWN.to_string(),
        }
    }

    #[test]
    fn record_counts_and_keeps_order_below_cap() {
        let mut log = VisitLog::default();
        for n in 0..5 {
            log.record(visit(n));
        }
        assert_eq!(log.total_visits, 5);
        let agents: Vec<_> = log.visitors.iter().map(|v| v.user_agent.as_str()).collect();
        assert_eq!(agents, ["agent-0", "agent-1", "agent-2", "agent-3", "agent-4"]);
    }

    #[test]
    fn record_past_cap_drops_only_the_oldest() {
        let mut log = VisitLog::default();
        for n in 0..MAX_VISITORS {
            log.record(visit(n));
        }
        assert_eq!(log.visitors.len(), MAX_VISITORS);

        log.record(visit(MAX_VISITORS));

        assert_eq!(log.total_visits, (MAX_VISITORS + 1) as u64);
        assert_eq!(log.visitors.len(), MAX_VISITORS);
        assert_eq!(log.visitors.first().unwrap().user_agent, "agent-1");
        assert_eq!(
            log.visitors.last().unwrap().user_agent,
            format!("agent-{MAX_VISITORS}")
        );
    }

    #[test]
    fn total_keeps_counting_after_truncation() {
        let mut log = VisitLog::default();
        for n in 0..2500 {
            log.record(visit(n % 1000));
        }
        assert_eq!(log.total_visits, 2500);
        assert_eq!(log.visitors.len(), MAX_VISITORS);
    }

    #[test]
    fn log_uses_camel_case_on_disk() {
        let mut log = VisitLog::default();
        log.record(visit(1));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["totalVisits"], 1);
        assert_eq!(json["visitors"][0]["userAgent"], "agent-1");
        assert_eq!(json["visitors"][0]["referrer"], "direct");
        assert_eq!(json["visitors"][0]["sourceAddress"], "unknown");
    }

    #[test]
    fn log_reads_legacy_field_names() {
        let raw = r#"{
            "totalVisits": 3,
            "visitors": [
                {"timestamp": "2025-03-01T08:00:00.000Z", "userAgent": "curl/8", "referer": "direct", "ip": "10.0.0.1"}
            ]
        }"#;
        let log: VisitLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.total_visits, 3);
        assert_eq!(log.visitors[0].referrer, "direct");
        assert_eq!(log.visitors[0].source_address, "10.0.0.1");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let log: VisitLog = serde_json::from_str("{}").unwrap();
        assert_eq!(log, VisitLog::default());
    }
}
