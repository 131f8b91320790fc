use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitRule {
    const fn new(per_second: u64, burst_size: u32) -> Self {
        Self {
            per_second,
            burst_size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth: RateLimitRule,
    pub public_read: RateLimitRule,
    pub protected: RateLimitRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth: RateLimitRule::new(5, 10),
            public_read: RateLimitRule::new(30, 60),
            protected: RateLimitRule::new(10, 20),
        }
    }
}

impl RateLimitConfig {
    /// Per-group rules come from env as "per_second:burst", e.g.
    /// `RATE_LIMIT_AUTH=5:10`. Invalid values keep the default and log.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.enabled = parse_bool_env("RATE_LIMIT_ENABLED", cfg.enabled);
        cfg.auth = rule_from_env("RATE_LIMIT_AUTH", cfg.auth);
        cfg.public_read = rule_from_env("RATE_LIMIT_PUBLIC", cfg.public_read);
        cfg.protected = rule_from_env("RATE_LIMIT_PROTECTED", cfg.protected);
        cfg
    }
}

fn rule_from_env(var_name: &str, default: RateLimitRule) -> RateLimitRule {
    match env::var(var_name) {
        Ok(raw) => match parse_rule(&raw) {
            Ok(rule) => rule,
            Err(err) => {
                tracing::warn!("Invalid {} '{}': {}", var_name, raw, err);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_rule(raw: &str) -> Result<RateLimitRule, String> {
    let (per, burst) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected per_second:burst, got '{}'", raw))?;
    let per_second: u64 = per
        .trim()
        .parse()
        .map_err(|_| format!("invalid per_second '{}'", per))?;
    let burst_size: u32 = burst
        .trim()
        .parse()
        .map_err(|_| format!("invalid burst '{}'", burst))?;
    if per_second == 0 || burst_size == 0 {
        return Err("per_second and burst must be positive".to_string());
    }
    Ok(RateLimitRule {
        per_second,
        burst_size,
    })
}

fn parse_bool_env(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rule_valid() {
        let rule = parse_rule("5:10").unwrap();
        assert_eq!(rule, RateLimitRule::new(5, 10));
    }

    #[test]
    fn parse_rule_with_whitespace() {
        let rule = parse_rule(" 30 : 60 ").unwrap();
        assert_eq!(rule, RateLimitRule::new(30, 60));
    }

    #[test]
    fn parse_rule_missing_separator() {
        assert!(parse_rule("510").is_err());
    }

    #[test]
    fn parse_rule_zero_rejected() {
        assert!(parse_rule("0:10").is_err());
        assert!(parse_rule("5:0").is_err());
    }
}
