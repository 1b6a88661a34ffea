use crate::core::config::CreditConfig;

/// Budget of external reply requests
///
/// Stored as a bare number. When the ledger is empty the conversation
/// keeps going on rule-based replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditLedger {
    remaining: u32,
    initial: u32,
    per_request: u32,
}

impl CreditLedger {
    pub fn new(config: &CreditConfig) -> Self {
        Self::with_remaining(config, config.initial)
    }

    /// Restore a ledger from a stored balance
    pub fn with_remaining(config: &CreditConfig, remaining: u32) -> Self {
        Self {
            remaining,
            initial: config.initial,
            per_request: config.per_request,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_afford(&self) -> bool {
        self.remaining >= self.per_request
    }

    /// Charge one request; false (and nothing charged) if short
    pub fn consume(&mut self) -> bool {
        if !self.can_afford() {
            tracing::warn!(
                "Insufficient credits for an external reply ({} left)",
                self.remaining
            );
            return false;
        }
        self.remaining -= self.per_request;
        tracing::debug!(
            "Credits consumed: {}. Remaining: {}",
            self.per_request,
            self.remaining
        );
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
        tracing::info!("Credits reset to {}", self.initial);
    }
}
