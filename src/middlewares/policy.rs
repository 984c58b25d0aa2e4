//! Host / Origin 허용 정책

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
enum HostPattern {
    Any,
    Exact(String),
    /// `*.example.com` → `.example.com`
    Suffix(String),
}

/// 허용 Host 패턴 집합
///
/// `*`는 모든 Host, `*.example.com`은 하위 도메인(`api.example.com`),
/// 그 외에는 정확히 일치하는 이름만 허용합니다. 포트는 무시합니다.
#[derive(Debug, Clone)]
pub struct HostPolicy {
    patterns: Vec<HostPattern>,
}

impl HostPolicy {
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .map(|pattern| pattern.trim().to_lowercase())
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                if pattern == "*" {
                    HostPattern::Any
                } else if let Some(suffix) = pattern.strip_prefix('*') {
                    HostPattern::Suffix(suffix.to_string())
                } else {
                    HostPattern::Exact(pattern)
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn is_allowed(&self, host: &str) -> bool {
        let host = strip_port(host.trim()).to_lowercase();

        self.patterns.iter().any(|pattern| match pattern {
            HostPattern::Any => true,
            HostPattern::Exact(name) => !host.is_empty() && host == *name,
            HostPattern::Suffix(suffix) => host.len() > suffix.len() && host.ends_with(suffix.as_str()),
        })
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8080
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.split_once(':') {
        Some((name, _port)) => name,
        None => host,
    }
}

/// 허용 Origin 집합. `*`가 포함되면 모든 Origin을 허용합니다.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    any: bool,
    origins: HashSet<String>,
}

impl OriginPolicy {
    pub fn new(origins: &[String]) -> Self {
        let any = origins.iter().any(|origin| origin.trim() == "*");
        let origins = origins
            .iter()
            .map(|origin| normalize_origin(origin))
            .filter(|origin| !origin.is_empty() && origin != "*")
            .collect();

        Self { any, origins }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.any || self.origins.contains(&normalize_origin(origin))
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_lowercase()
}
