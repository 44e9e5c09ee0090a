use super::GuardConfig;

impl GuardConfig {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable or empty values
    /// are ignored.
    pub fn apply_overrides_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("LAWSAGE_COURTLISTENER_API_KEY").or_else(|| var("COURTLISTENER_API_KEY"))
            && !key.trim().is_empty()
        {
            self.verification.courtlistener_api_key = Some(key);
        }

        if let Some(url) = var("LAWSAGE_COURTLISTENER_BASE_URL")
            && !url.trim().is_empty()
        {
            self.verification.courtlistener_base_url = url;
        }

        if let Some(enabled) = var("LAWSAGE_VERIFY_CITATIONS")
            && let Some(enabled) = parse_bool(&enabled)
        {
            self.verification.enabled = enabled;
        }

        if let Some(enabled) = var("LAWSAGE_CONTEXTUAL_REDACTION")
            && let Some(enabled) = parse_bool(&enabled)
        {
            self.redaction.enable_contextual_pass = enabled;
        }

        if let Some(attempts) = var("LAWSAGE_MAX_CORRECTION_ATTEMPTS")
            && let Ok(attempts) = attempts.trim().parse::<u32>()
        {
            self.correction.max_attempts = attempts;
        }

        if let Some(threshold) = var("LAWSAGE_VALIDITY_THRESHOLD")
            && let Ok(threshold) = threshold.trim().parse::<f64>()
            && (0.0..=1.0).contains(&threshold)
        {
            self.critique.validity_threshold = threshold;
        }

        if let Some(concurrency) = var("LAWSAGE_VERIFY_CONCURRENCY")
            && let Ok(concurrency) = concurrency.trim().parse::<usize>()
        {
            self.verification.concurrency = concurrency;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
