#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::assets::AssetKind;
    use crate::errors::{Error, Result};
    use crate::fx::{Currency, ExchangeRateSet, FxError, FxRateSource, RatePair};
    use crate::portfolio::holdings::{Holding, PortfolioConfig, WeightConfig};
    use crate::portfolio::intraday::TimeSeriesPoint;
    use crate::portfolio::store::PortfolioStore;
    use crate::portfolio::valuation::{
        apply_quote_updates, LiveValuationService, PortfolioSnapshot,
    };
    use crate::quotes::{IntradayHistory, PriceSource, PriceSourceError, QuoteUpdate};

    // =========================================================================
    // Mock collaborators
    // =========================================================================

    #[derive(Default)]
    struct MockStore {
        configs: HashMap<String, PortfolioConfig>,
        saved_totals: Mutex<Vec<(String, PortfolioSnapshot)>>,
        appended_points: Mutex<Vec<(String, NaiveDate, TimeSeriesPoint)>>,
    }

    impl MockStore {
        fn with_config(config: PortfolioConfig) -> Self {
            let mut store = Self::default();
            store.configs.insert(config.code.clone(), config);
            store
        }

        fn saved_totals(&self) -> Vec<(String, PortfolioSnapshot)> {
            self.saved_totals.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PortfolioStore for MockStore {
        async fn get_portfolio(&self, code: &str) -> Result<PortfolioConfig> {
            self.configs
                .get(code)
                .cloned()
                .ok_or_else(|| Error::PortfolioNotFound(code.to_string()))
        }

        async fn save_totals(&self, code: &str, snapshot: &PortfolioSnapshot) -> Result<()> {
            self.saved_totals
                .lock()
                .unwrap()
                .push((code.to_string(), *snapshot));
            Ok(())
        }

        async fn append_intraday_point(
            &self,
            code: &str,
            day: NaiveDate,
            point: &TimeSeriesPoint,
        ) -> Result<()> {
            self.appended_points
                .lock()
                .unwrap()
                .push((code.to_string(), day, point.clone()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockPriceSource {
        quotes: HashMap<String, QuoteUpdate>,
        fail_quotes: bool,
    }

    impl MockPriceSource {
        fn with_quote(mut self, code: &str, current: Decimal, prev_close: Decimal) -> Self {
            self.quotes.insert(
                code.to_string(),
                QuoteUpdate {
                    code: code.to_string(),
                    current_price: current,
                    prev_close,
                    success: true,
                },
            );
            self
        }
    }

    #[async_trait]
    impl PriceSource for MockPriceSource {
        async fn fetch_quotes(
            &self,
            symbols: &[String],
            _foreign: bool,
        ) -> Result<Vec<QuoteUpdate>> {
            if self.fail_quotes {
                return Err(PriceSourceError::FetchFailed("provider down".to_string()).into());
            }
            Ok(symbols
                .iter()
                .map(|symbol| {
                    self.quotes
                        .get(symbol)
                        .cloned()
                        .unwrap_or_else(|| QuoteUpdate::failed(symbol.clone()))
                })
                .collect())
        }

        async fn fetch_history(&self, _symbol: &str, _foreign: bool) -> Result<IntradayHistory> {
            Ok(IntradayHistory::default())
        }
    }

    #[derive(Default)]
    struct MockFxSource {
        rates: ExchangeRateSet,
        fail: bool,
    }

    #[async_trait]
    impl FxRateSource for MockFxSource {
        async fn fetch_rates(&self) -> Result<ExchangeRateSet> {
            if self.fail {
                return Err(FxError::FetchFailed("tcmb unreachable".to_string()).into());
            }
            Ok(self.rates.clone())
        }
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn holding(code: &str, quantity: Decimal, cost: Decimal, price: Decimal) -> Holding {
        Holding {
            code: code.to_string(),
            name: None,
            kind: AssetKind::Stock,
            quantity,
            current_price: price,
            cost,
            currency: Currency::TRY,
            is_manual: false,
            is_foreign: false,
        }
    }

    fn config(code: &str, holdings: Vec<Holding>) -> PortfolioConfig {
        PortfolioConfig {
            code: code.to_string(),
            name: format!("{} Fund", code),
            holdings,
            weights: WeightConfig::default(),
        }
    }

    fn service(
        store: MockStore,
        prices: MockPriceSource,
        fx: MockFxSource,
    ) -> LiveValuationService {
        LiveValuationService::new(Arc::new(store), Arc::new(prices), Arc::new(fx))
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn refreshes_prices_and_persists_totals() {
        let store = Arc::new(MockStore::with_config(config(
            "TLY",
            vec![holding("THY", dec!(100), dec!(9), dec!(9))],
        )));
        let prices = MockPriceSource::default().with_quote("THY", dec!(11), dec!(10));
        let service = LiveValuationService::new(
            store.clone(),
            Arc::new(prices),
            Arc::new(MockFxSource::default()),
        );

        let valuation = service.value_portfolio("TLY").await.unwrap();

        // The stale stored prices are replaced by the live quote before the
        // snapshot is computed: cost syncs with prev close.
        assert_eq!(valuation.snapshot.total_value, dec!(1100));
        assert_eq!(valuation.snapshot.total_cost, dec!(1000));
        assert_eq!(valuation.snapshot.return_percent, dec!(10));

        let saved = store.saved_totals();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "TLY");
        assert_eq!(saved[0].1, valuation.snapshot);
    }

    #[tokio::test]
    async fn manual_holdings_keep_their_entered_prices() {
        let store = MockStore::with_config(config("TLY", {
            let mut manual = holding("MNL", dec!(10), dec!(40), dec!(42));
            manual.is_manual = true;
            vec![manual]
        }));
        // Even a quote for the same code must not touch a manual holding.
        let prices = MockPriceSource::default().with_quote("MNL", dec!(999), dec!(999));

        let valuation = service(store, prices, MockFxSource::default())
            .value_portfolio("TLY")
            .await
            .unwrap();

        assert_eq!(valuation.snapshot.total_value, dec!(420));
        assert_eq!(valuation.snapshot.total_cost, dec!(400));
    }

    #[tokio::test]
    async fn failed_symbols_keep_previous_prices() {
        let store = MockStore::with_config(config(
            "TLY",
            vec![
                holding("THY", dec!(100), dec!(9), dec!(9)),
                holding("DEAD", dec!(10), dec!(5), dec!(5)),
            ],
        ));
        // Only THY gets a live quote; DEAD comes back as a failed update.
        let prices = MockPriceSource::default().with_quote("THY", dec!(11), dec!(10));

        let valuation = service(store, prices, MockFxSource::default())
            .value_portfolio("TLY")
            .await
            .unwrap();

        // THY refreshed, DEAD untouched: 1100 + 50 / 1000 + 50.
        assert_eq!(valuation.snapshot.total_value, dec!(1150));
        assert_eq!(valuation.snapshot.total_cost, dec!(1050));
    }

    #[tokio::test]
    async fn quote_batch_failure_leaves_prices_stale() {
        let store = MockStore::with_config(config(
            "TLY",
            vec![holding("THY", dec!(100), dec!(10), dec!(11))],
        ));
        let prices = MockPriceSource {
            fail_quotes: true,
            ..Default::default()
        };

        let valuation = service(store, prices, MockFxSource::default())
            .value_portfolio("TLY")
            .await
            .unwrap();

        // The stored prices still value the portfolio.
        assert_eq!(valuation.snapshot.total_value, dec!(1100));
        assert_eq!(valuation.snapshot.return_percent, dec!(10));
    }

    #[tokio::test]
    async fn rates_failure_degrades_to_identity() {
        let mut foreign = holding("AAPL", dec!(10), dec!(100), dec!(110));
        foreign.currency = Currency::USD;
        foreign.is_foreign = true;
        let store = MockStore::with_config(config("GLB", vec![foreign]));
        let prices = MockPriceSource::default().with_quote("AAPL", dec!(110), dec!(100));
        let fx = MockFxSource {
            fail: true,
            ..Default::default()
        };

        let valuation = service(store, prices, fx)
            .value_portfolio("GLB")
            .await
            .unwrap();

        // Identity rates: the USD figures read as base currency.
        assert_eq!(valuation.snapshot.total_value, dec!(1100));
        assert_eq!(valuation.snapshot.total_cost, dec!(1000));
    }

    #[tokio::test]
    async fn foreign_rates_apply_when_available() {
        let mut foreign = holding("AAPL", dec!(10), dec!(100), dec!(100));
        foreign.currency = Currency::USD;
        foreign.is_foreign = true;
        let store = MockStore::with_config(config("GLB", vec![foreign]));
        let prices = MockPriceSource::default().with_quote("AAPL", dec!(100), dec!(100));
        let fx = MockFxSource {
            rates: [(
                Currency::USD,
                RatePair {
                    current: dec!(35),
                    prev: dec!(34),
                },
            )]
            .into_iter()
            .collect(),
            fail: false,
        };

        let valuation = service(store, prices, fx)
            .value_portfolio("GLB")
            .await
            .unwrap();

        assert_eq!(valuation.snapshot.total_value, dec!(35000));
        assert_eq!(valuation.snapshot.total_cost, dec!(34000));
        assert_eq!(valuation.snapshot.return_percent.round_dp(2), dec!(2.94));
    }

    #[tokio::test]
    async fn unknown_portfolio_is_an_error() {
        let service = service(
            MockStore::default(),
            MockPriceSource::default(),
            MockFxSource::default(),
        );

        let err = service.value_portfolio("NOPE").await.unwrap_err();
        assert!(matches!(err, Error::PortfolioNotFound(_)));
    }

    #[test]
    fn apply_quote_updates_matches_by_code() {
        let mut holdings = vec![
            holding("THY", dec!(100), dec!(9), dec!(9)),
            holding("OTHER", dec!(1), dec!(1), dec!(1)),
        ];
        let updates = vec![QuoteUpdate {
            code: "THY".to_string(),
            current_price: dec!(11),
            prev_close: dec!(10),
            success: true,
        }];

        apply_quote_updates(&mut holdings, &updates);

        assert_eq!(holdings[0].current_price, dec!(11));
        assert_eq!(holdings[0].cost, dec!(10));
        assert_eq!(holdings[1].current_price, dec!(1));
    }
}
