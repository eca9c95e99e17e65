//! Index paths addressing a node from the root, written `0.2.1`.
//!
//! The root itself is `.` (an empty path).

use crate::domain::error::{DomainError, DomainResult};

pub const ROOT_POSITION: &str = ".";

pub fn parse_position(s: &str) -> DomainResult<Vec<usize>> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == ROOT_POSITION {
        return Ok(Vec::new());
    }
    trimmed
        .split('.')
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| DomainError::InvalidPosition {
                    position: s.to_string(),
                })
        })
        .collect()
}

pub fn format_position(position: &[usize]) -> String {
    if position.is_empty() {
        return ROOT_POSITION.to_string();
    }
    position
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
