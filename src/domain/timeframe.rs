//! Timeframe aggregation: fine-grained candles → coarser buckets.

use chrono::{Duration, Timelike};
use std::collections::BTreeMap;

use crate::domain::candle::Candle;

/// Aggregate candles into `target_timeframe_min` buckets.
///
/// Each candle lands in the bucket whose timestamp is the candle's timestamp
/// floored to the target boundary (minute modulo target, seconds and
/// sub-seconds zeroed). Per bucket: open from the first candle, close from
/// the last, high/low extremes, summed volume, volume-weighted vwap (last
/// close when the bucket has zero volume). Output is sorted by bucket
/// timestamp. A zero target yields an empty series.
pub fn aggregate(candles: &[Candle], target_timeframe_min: u32) -> Vec<Candle> {
    if target_timeframe_min == 0 {
        return Vec::new();
    }

    let mut grouped: BTreeMap<chrono::DateTime<chrono::Utc>, Vec<&Candle>> = BTreeMap::new();
    for candle in candles {
        let ts = candle.timestamp;
        let bucket = ts
            - Duration::minutes((ts.minute() % target_timeframe_min) as i64)
            - Duration::seconds(ts.second() as i64)
            - Duration::nanoseconds(ts.nanosecond() as i64);
        grouped.entry(bucket).or_default().push(candle);
    }

    grouped
        .into_iter()
        .map(|(bucket, group)| {
            let vwap_num: f64 = group.iter().map(|c| c.vwap * c.volume).sum();
            let vwap_den: f64 = group.iter().map(|c| c.volume).sum();
            let close = group[group.len() - 1].close;
            Candle {
                symbol: group[0].symbol.clone(),
                timeframe_min: target_timeframe_min,
                open: group[0].open,
                high: group.iter().map(|c| c.high).fold(f64::MIN, f64::max),
                low: group.iter().map(|c| c.low).fold(f64::MAX, f64::min),
                close,
                volume: vwap_den,
                vwap: if vwap_den != 0.0 { vwap_num / vwap_den } else { close },
                timestamp: bucket,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn minute_candle(minute: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
        Candle {
            symbol: "XRPUSDT".into(),
            timeframe_min: 1,
            open,
            high,
            low,
            close,
            volume,
            vwap: close,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
                + chrono::Duration::minutes(minute),
        }
    }

    #[test]
    fn five_minute_buckets() {
        let candles: Vec<Candle> = (0..10)
            .map(|i| minute_candle(i, 1.0 + i as f64, 2.0 + i as f64, 0.5, 1.5 + i as f64, 100.0))
            .collect();
        let aggregated = aggregate(&candles, 5);

        assert_eq!(aggregated.len(), 2);
        assert_eq!(aggregated[0].timeframe_min, 5);
        assert_eq!(aggregated[0].open, 1.0);
        assert_eq!(aggregated[0].close, 1.5 + 4.0);
        assert_eq!(aggregated[0].high, 2.0 + 4.0);
        assert_eq!(aggregated[0].low, 0.5);
        assert_eq!(aggregated[0].volume, 500.0);
        assert_eq!(
            aggregated[1].timestamp,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 5, 0).unwrap()
        );
    }

    #[test]
    fn vwap_is_volume_weighted() {
        let mut first = minute_candle(0, 1.0, 1.0, 1.0, 1.0, 300.0);
        first.vwap = 1.0;
        let mut second = minute_candle(1, 2.0, 2.0, 2.0, 2.0, 100.0);
        second.vwap = 2.0;
        let aggregated = aggregate(&[first, second], 5);

        assert_eq!(aggregated.len(), 1);
        // (1·300 + 2·100) / 400
        assert!((aggregated[0].vwap - 1.25).abs() < 1e-12);
    }

    #[test]
    fn zero_volume_bucket_falls_back_to_close() {
        let candles = vec![
            minute_candle(0, 1.0, 1.0, 1.0, 1.0, 0.0),
            minute_candle(1, 2.0, 2.0, 2.0, 2.0, 0.0),
        ];
        let aggregated = aggregate(&candles, 5);
        assert_eq!(aggregated[0].vwap, 2.0);
    }

    #[test]
    fn seconds_are_floored_into_the_bucket() {
        let mut candle = minute_candle(3, 1.0, 1.0, 1.0, 1.0, 10.0);
        candle.timestamp += chrono::Duration::seconds(42);
        let aggregated = aggregate(&[candle], 5);
        assert_eq!(
            aggregated[0].timestamp,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn output_sorted_by_bucket() {
        let candles = vec![
            minute_candle(7, 2.0, 2.0, 2.0, 2.0, 10.0),
            minute_candle(1, 1.0, 1.0, 1.0, 1.0, 10.0),
        ];
        let aggregated = aggregate(&candles, 5);
        assert_eq!(aggregated.len(), 2);
        assert!(aggregated[0].timestamp < aggregated[1].timestamp);
    }

    #[test]
    fn zero_target_yields_empty() {
        let candles = vec![minute_candle(0, 1.0, 1.0, 1.0, 1.0, 10.0)];
        assert!(aggregate(&candles, 0).is_empty());
    }
}
