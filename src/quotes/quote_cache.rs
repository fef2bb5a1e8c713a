//! TTL cache decorator for a price source.
//!
//! Caching lives in an explicit wrapper around the collaborator interface;
//! the calculation engine itself holds no ambient cache state. Quotes and
//! histories age out independently, since a quote goes stale in a minute
//! while an intraday series stays useful for much longer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::quotes_model::{IntradayHistory, QuoteUpdate};
use super::quotes_traits::PriceSource;
use crate::errors::Result;

struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.inserted_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

type SymbolKey = (String, bool);

/// Wraps any [`PriceSource`] with per-symbol TTL caching.
pub struct CachedPriceSource {
    inner: Arc<dyn PriceSource>,
    quote_ttl: Duration,
    history_ttl: Duration,
    quotes: DashMap<SymbolKey, CacheEntry<QuoteUpdate>>,
    histories: DashMap<SymbolKey, CacheEntry<IntradayHistory>>,
}

impl CachedPriceSource {
    pub fn new(inner: Arc<dyn PriceSource>, quote_ttl: Duration, history_ttl: Duration) -> Self {
        Self {
            inner,
            quote_ttl,
            history_ttl,
            quotes: DashMap::new(),
            histories: DashMap::new(),
        }
    }

    /// Drops every cached entry.
    pub fn invalidate_all(&self) {
        self.quotes.clear();
        self.histories.clear();
    }
}

#[async_trait]
impl PriceSource for CachedPriceSource {
    async fn fetch_quotes(&self, symbols: &[String], foreign: bool) -> Result<Vec<QuoteUpdate>> {
        let mut answered: HashMap<String, QuoteUpdate> = HashMap::new();
        let mut misses: Vec<String> = Vec::new();

        for symbol in symbols {
            let key = (symbol.clone(), foreign);
            match self
                .quotes
                .get(&key)
                .and_then(|entry| entry.fresh(self.quote_ttl))
            {
                Some(update) => {
                    answered.insert(symbol.clone(), update);
                }
                None => misses.push(symbol.clone()),
            }
        }

        if !misses.is_empty() {
            debug!(
                "Quote cache: {} hits, fetching {} symbols",
                answered.len(),
                misses.len()
            );
            for update in self.inner.fetch_quotes(&misses, foreign).await? {
                // Failed updates are not cached; the next call retries them.
                if update.success {
                    self.quotes
                        .insert((update.code.clone(), foreign), CacheEntry::new(update.clone()));
                }
                answered.insert(update.code.clone(), update);
            }
        }

        // Preserve request order; symbols the provider never answered are
        // simply absent, like any other per-symbol failure.
        Ok(symbols
            .iter()
            .filter_map(|symbol| answered.get(symbol).cloned())
            .collect())
    }

    async fn fetch_history(&self, symbol: &str, foreign: bool) -> Result<IntradayHistory> {
        let key = (symbol.to_string(), foreign);
        if let Some(history) = self
            .histories
            .get(&key)
            .and_then(|entry| entry.fresh(self.history_ttl))
        {
            debug!("History cache hit for {}", symbol);
            return Ok(history);
        }

        let history = self.inner.fetch_history(symbol, foreign).await?;
        self.histories.insert(key, CacheEntry::new(history.clone()));
        Ok(history)
    }
}
