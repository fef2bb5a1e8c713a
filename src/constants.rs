/// Session open for synthesized manual series, Istanbul wall-clock hour.
pub const SESSION_OPEN_HOUR: u32 = 10;

/// Session close for synthesized manual series, Istanbul wall-clock hour.
pub const SESSION_CLOSE_HOUR: u32 = 18;

/// Matched-order close of the local session. Once past this time the intraday
/// curve's trailing point is pinned here instead of the wall clock.
pub const SESSION_CUTOFF_HOUR: u32 = 18;
pub const SESSION_CUTOFF_MINUTE: u32 = 10;

/// Foreign sessions are windowed at 17:30 Istanbul time (14:30 UTC).
pub const FOREIGN_CUTOFF_UTC_HOUR: u32 = 14;
pub const FOREIGN_CUTOFF_UTC_MINUTE: u32 = 30;

/// Sampling interval for synthesized manual histories.
pub const MANUAL_SAMPLE_INTERVAL_MS: i64 = 5 * 60 * 1000;

/// Maximum distance between the last historical point and the synthesized
/// trailing point. A stale series (weekend data on Monday) gets no tail.
pub const MAX_TRAILING_GAP_MS: i64 = 12 * 60 * 60 * 1000;

/// Decimal precision for persisted valuation figures.
pub const DECIMAL_PRECISION: u32 = 6;
