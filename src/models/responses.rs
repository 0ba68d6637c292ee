//! Response DTOs for the order service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses, expired reads included
    pub misses: u64,
    /// Reads that found an expired entry
    pub expired: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Entries removed by the cleanup sweep
    pub swept: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            evictions: stats.evictions,
            swept: stats.swept,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for an accepted order event (POST /api/v1/orders)
#[derive(Debug, Clone, Serialize)]
pub struct PublishResponse {
    pub message: String,
}

impl PublishResponse {
    pub fn accepted() -> Self {
        Self {
            message: "order event accepted".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_from_cache_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            expired: 5,
            evictions: 3,
            swept: 7,
            total_entries: 100,
        };

        let resp = StatsResponse::from(stats);

        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expired, 5);
        assert_eq!(resp.swept, 7);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("order not found");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"order not found"}"#);
    }
}
