//! Pixel to vw/rem conversion with per-unit memoization

use crate::lru::LruCache;
use crate::number_format::format_rounded;
use ordered_float::OrderedFloat;
use std::fmt;
use std::num::NonZeroUsize;

/// A unit a pixel length can be converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Vw,
    Rem,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Vw => "vw",
            LengthUnit::Rem => "rem",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// `px / viewport_width * 100` rounded and suffixed with `vw`.
///
/// `None` when the quotient overflows to infinity.
pub fn to_vw(px: f64, viewport_width: f64, precision: u32) -> Option<String> {
    suffixed(px / viewport_width * 100.0, precision, LengthUnit::Vw)
}

/// `px / html_font_size` rounded and suffixed with `rem`.
///
/// `None` when the quotient overflows to infinity.
pub fn to_rem(px: f64, html_font_size: f64, precision: u32) -> Option<String> {
    suffixed(px / html_font_size, precision, LengthUnit::Rem)
}

fn suffixed(quotient: f64, precision: u32, unit: LengthUnit) -> Option<String> {
    if !quotient.is_finite() {
        return None;
    }
    Some(format!("{}{}", format_rounded(quotient, precision), unit))
}

type CacheKey = (OrderedFloat<f64>, u32);

/// Converts pixel magnitudes into one target unit.
///
/// Results are memoized by `(magnitude, precision)`; the cache is private
/// to this converter and never changes what `convert` returns. A magnitude
/// whose quotient is not finite converts to `None`.
#[derive(Debug, Clone)]
pub struct UnitConverter {
    unit: LengthUnit,
    divisor: f64,
    cache: Option<LruCache<CacheKey, Option<String>>>,
}

impl UnitConverter {
    pub fn vw(viewport_width: f64, cache_capacity: NonZeroUsize) -> Self {
        Self {
            unit: LengthUnit::Vw,
            divisor: viewport_width,
            cache: Some(LruCache::new(cache_capacity)),
        }
    }

    pub fn rem(html_font_size: f64, cache_capacity: NonZeroUsize) -> Self {
        Self {
            unit: LengthUnit::Rem,
            divisor: html_font_size,
            cache: Some(LruCache::new(cache_capacity)),
        }
    }

    /// A converter that recomputes every value
    pub fn uncached(unit: LengthUnit, divisor: f64) -> Self {
        Self {
            unit,
            divisor,
            cache: None,
        }
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn convert(&mut self, px: f64, precision: u32) -> Option<String> {
        let Some(cache) = self.cache.as_mut() else {
            return compute(self.unit, self.divisor, px, precision);
        };

        let key = (OrderedFloat(px), precision);
        if let Some(hit) = cache.get(&key) {
            return hit.clone();
        }

        let value = compute(self.unit, self.divisor, px, precision);
        cache.insert(key, value.clone());
        value
    }

    /// Number of memoized conversions (always 0 when uncached)
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, LruCache::len)
    }
}

fn compute(unit: LengthUnit, divisor: f64, px: f64, precision: u32) -> Option<String> {
    match unit {
        LengthUnit::Vw => to_vw(px, divisor, precision),
        LengthUnit::Rem => to_rem(px, divisor, precision),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_to_vw() {
        assert_eq!(to_vw(100.0, 375.0, 5).as_deref(), Some("26.66667vw"));
        assert_eq!(to_vw(10.0, 375.0, 5).as_deref(), Some("2.66667vw"));
        assert_eq!(to_vw(375.0, 375.0, 5).as_deref(), Some("100vw"));
        assert_eq!(to_vw(100.0, 750.0, 5).as_deref(), Some("13.33333vw"));
    }

    #[test]
    fn test_to_rem() {
        assert_eq!(to_rem(32.0, 16.0, 5).as_deref(), Some("2rem"));
        assert_eq!(to_rem(100.0, 37.5, 5).as_deref(), Some("2.66667rem"));
        assert_eq!(to_rem(100.0, 37.5, 2).as_deref(), Some("2.67rem"));
        assert_eq!(to_rem(24.0, 16.0, 5).as_deref(), Some("1.5rem"));
    }

    #[test]
    fn test_overflowing_quotient_has_no_conversion() {
        // Finite input, but times 100 exceeds f64::MAX
        assert_eq!(to_vw(1e307, 1.0, 5), None);
        assert_eq!(to_rem(f64::MAX, 0.5, 5), None);
        assert_eq!(to_rem(1e307, 1.0, 5).as_deref(), Some(format!("{}rem", 1e307).as_str()));

        let mut converter = UnitConverter::vw(1.0, capacity(4));
        assert_eq!(converter.convert(1e307, 5), None);
        assert_eq!(converter.convert(1e307, 5), None);
        assert_eq!(converter.convert(1.0, 5).as_deref(), Some("100vw"));
    }

    #[test]
    fn test_cold_and_warm_cache_agree() {
        let mut converter = UnitConverter::vw(375.0, capacity(4));
        let cold = converter.convert(100.0, 5);
        let warm = converter.convert(100.0, 5);

        assert_eq!(cold.as_deref(), Some("26.66667vw"));
        assert_eq!(cold, warm);
        assert_eq!(converter.cached_len(), 1);
    }

    #[test]
    fn test_precision_is_part_of_key() {
        let mut converter = UnitConverter::rem(37.5, capacity(4));
        assert_eq!(converter.convert(100.0, 5).as_deref(), Some("2.66667rem"));
        assert_eq!(converter.convert(100.0, 1).as_deref(), Some("2.7rem"));
        assert_eq!(converter.cached_len(), 2);
    }

    #[test]
    fn test_cache_stays_bounded() {
        let mut cached = UnitConverter::vw(375.0, capacity(3));
        let mut uncached = UnitConverter::uncached(LengthUnit::Vw, 375.0);

        for px in 2..20 {
            let px = px as f64 * 1.5;
            assert_eq!(cached.convert(px, 5), uncached.convert(px, 5));
        }
        assert_eq!(cached.cached_len(), 3);
        assert_eq!(uncached.cached_len(), 0);

        // Evicted entries are recomputed identically
        assert_eq!(cached.convert(3.0, 5), uncached.convert(3.0, 5));
    }
}
