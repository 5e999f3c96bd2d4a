//! Process-wide, per-locale abbreviation cache.
//!
//! The first lookup for a (dimension, locale) pair populates the abbreviations of *every* unit of
//! that dimension in one pass; later lookups are served from the cache without consulting the
//! data source again. Each key owns a [`OnceCell`], so concurrent first lookups race only for the
//! right to populate: exactly one pass runs and every caller observes the same published table.
//!
//! Resolution order per unit: the source in the requested locale, the source in the invariant
//! locale, then the abbreviations compiled into the unit. When all three are empty the lookup
//! fails with [`MissingAbbreviationError`].

mod source;

pub use source::{AbbreviationSource, JsonAbbreviations, NoAbbreviations};

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::dimension::Dimension;
use crate::error::MissingAbbreviationError;
use crate::locale::Locale;
use crate::unit::Unit;

static GLOBAL: Lazy<AbbreviationCache> =
    Lazy::new(|| AbbreviationCache::new(JsonAbbreviations::builtin()));

type CacheKey = (TypeId, Locale);

/// Abbreviations of every unit of one dimension in one locale.
#[derive(Debug, Default)]
struct DimensionAbbreviations {
    by_unit: HashMap<&'static str, Vec<String>>,
}

/// Cache of unit abbreviations keyed by (dimension, locale).
pub struct AbbreviationCache {
    source: Box<dyn AbbreviationSource>,
    entries: RwLock<HashMap<CacheKey, Arc<OnceCell<Arc<DimensionAbbreviations>>>>>,
    populations: AtomicUsize,
}

impl AbbreviationCache {
    /// Creates an empty cache over `source`.
    pub fn new<S: AbbreviationSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            entries: RwLock::new(HashMap::new()),
            populations: AtomicUsize::new(0),
        }
    }

    /// The process-wide cache, backed by the abbreviation document embedded in the crate.
    pub fn global() -> &'static AbbreviationCache {
        &GLOBAL
    }

    /// Preferred abbreviation of `unit` in `locale`.
    pub fn abbreviation<D: Dimension>(
        &self,
        unit: D::Unit,
        locale: &Locale,
    ) -> Result<String, MissingAbbreviationError> {
        let table = self.table::<D>(locale);
        table
            .by_unit
            .get(unit.name())
            .and_then(|list| list.first())
            .cloned()
            .ok_or_else(|| missing::<D>(unit, locale))
    }

    /// All abbreviations of `unit` in `locale`, preferred one first.
    pub fn abbreviations<D: Dimension>(
        &self,
        unit: D::Unit,
        locale: &Locale,
    ) -> Result<Vec<String>, MissingAbbreviationError> {
        let table = self.table::<D>(locale);
        table
            .by_unit
            .get(unit.name())
            .filter(|list| !list.is_empty())
            .cloned()
            .ok_or_else(|| missing::<D>(unit, locale))
    }

    /// Number of population passes run so far.
    pub fn population_count(&self) -> usize {
        self.populations.load(Ordering::SeqCst)
    }

    /// Number of (dimension, locale) keys currently cached.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table<D: Dimension>(&self, locale: &Locale) -> Arc<DimensionAbbreviations> {
        let key: CacheKey = (TypeId::of::<D>(), locale.clone());

        let cached = self.entries.read().get(&key).cloned();
        let cell = match cached {
            Some(cell) => {
                log::trace!("abbreviation cache hit for {} in {}", D::NAME, locale);
                cell
            }
            None => self.entries.write().entry(key).or_default().clone(),
        };

        cell.get_or_init(|| {
            self.populations.fetch_add(1, Ordering::SeqCst);
            Arc::new(self.populate::<D>(locale))
        })
        .clone()
    }

    fn populate<D: Dimension>(&self, locale: &Locale) -> DimensionAbbreviations {
        log::debug!("populating {} abbreviations for locale {}", D::NAME, locale);

        let invariant = Locale::invariant();
        let mut by_unit = HashMap::with_capacity(<D::Unit as Unit>::ALL.len());
        let mut fallbacks = 0usize;

        for &unit in <D::Unit as Unit>::ALL {
            let localized = self
                .source
                .lookup(D::NAME, unit.name(), locale)
                .filter(|list| !list.is_empty());
            let resolved = match localized {
                Some(list) => list,
                None => {
                    fallbacks += 1;
                    self.invariant_abbreviations(D::NAME, unit, locale, &invariant)
                }
            };
            by_unit.insert(unit.name(), resolved);
        }

        if fallbacks > 0 && !locale.is_invariant() {
            log::warn!(
                "{} of {} {} units have no {} abbreviation; using invariant locale",
                fallbacks,
                <D::Unit as Unit>::ALL.len(),
                D::NAME,
                locale
            );
        }

        DimensionAbbreviations { by_unit }
    }

    fn invariant_abbreviations<U: Unit>(
        &self,
        dimension: &str,
        unit: U,
        locale: &Locale,
        invariant: &Locale,
    ) -> Vec<String> {
        let from_source = if locale.is_invariant() {
            None
        } else {
            self.source
                .lookup(dimension, unit.name(), invariant)
                .filter(|list| !list.is_empty())
        };

        from_source.unwrap_or_else(|| {
            unit.abbreviations()
                .iter()
                .map(|abbreviation| abbreviation.to_string())
                .collect()
        })
    }
}

impl Default for AbbreviationCache {
    fn default() -> Self {
        Self::new(JsonAbbreviations::builtin())
    }
}

impl std::fmt::Debug for AbbreviationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbbreviationCache")
            .field("entries", &self.len())
            .field("populations", &self.population_count())
            .finish()
    }
}

fn missing<D: Dimension>(unit: D::Unit, locale: &Locale) -> MissingAbbreviationError {
    MissingAbbreviationError {
        dimension: D::NAME,
        unit: unit.name(),
        locale: locale.tag().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceleration::{Acceleration, AccelerationUnit};
    use crate::rotational_speed::{RotationalSpeed, RotationalSpeedUnit};
    use std::thread;

    /// Counts lookups and only knows Norwegian for one unit.
    #[derive(Default)]
    struct CountingSource {
        lookups: Arc<AtomicUsize>,
    }

    impl AbbreviationSource for CountingSource {
        fn lookup(&self, dimension: &str, unit: &str, locale: &Locale) -> Option<Vec<String>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            match (dimension, unit, locale.tag()) {
                ("RotationalSpeed", "RevolutionPerMinute", "nb-NO") => {
                    Some(vec!["o/min".to_string(), "omdr/min".to_string()])
                }
                _ => None,
            }
        }
    }

    /// Answers every lookup with an empty list.
    struct EmptySource;

    impl AbbreviationSource for EmptySource {
        fn lookup(&self, _dimension: &str, _unit: &str, _locale: &Locale) -> Option<Vec<String>> {
            Some(Vec::new())
        }
    }

    #[test]
    fn empty_translation_falls_back_to_builtin() {
        let cache = AbbreviationCache::new(EmptySource);
        let rpm = RotationalSpeedUnit::RevolutionPerMinute;
        assert_eq!(
            cache.abbreviation::<RotationalSpeed>(rpm, &Locale::new("de-DE")).unwrap(),
            "rpm"
        );
        assert_eq!(
            cache.abbreviations::<RotationalSpeed>(rpm, &Locale::invariant()).unwrap(),
            vec!["rpm", "r/min"]
        );
    }

    #[test]
    fn builtin_abbreviations_serve_invariant_locale() {
        let cache = AbbreviationCache::new(NoAbbreviations);
        let abbr = cache
            .abbreviation::<RotationalSpeed>(RotationalSpeedUnit::RevolutionPerMinute, &Locale::invariant())
            .unwrap();
        assert_eq!(abbr, "rpm");
    }

    #[test]
    fn source_translation_wins_over_builtin() {
        let cache = AbbreviationCache::new(CountingSource::default());
        let all = cache
            .abbreviations::<RotationalSpeed>(
                RotationalSpeedUnit::RevolutionPerMinute,
                &Locale::new("nb-NO"),
            )
            .unwrap();
        assert_eq!(all, vec!["o/min", "omdr/min"]);
    }

    #[test]
    fn untranslated_locale_falls_back_to_invariant() {
        let cache = AbbreviationCache::new(CountingSource::default());
        let abbr = cache
            .abbreviation::<RotationalSpeed>(RotationalSpeedUnit::RadianPerSecond, &Locale::new("nb-NO"))
            .unwrap();
        assert_eq!(abbr, "rad/s");
    }

    #[test]
    fn population_is_batched_per_dimension_and_locale() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let cache = AbbreviationCache::new(CountingSource {
            lookups: Arc::clone(&lookups),
        });
        let locale = Locale::new("ru-RU");

        cache
            .abbreviation::<Acceleration>(AccelerationUnit::MeterPerSecondSquared, &locale)
            .unwrap();
        let after_first = lookups.load(Ordering::SeqCst);
        assert!(after_first >= AccelerationUnit::ALL.len());

        for &unit in AccelerationUnit::ALL {
            let _ = cache.abbreviation::<Acceleration>(unit, &locale);
        }

        assert_eq!(lookups.load(Ordering::SeqCst), after_first);
        assert_eq!(cache.population_count(), 1);

        cache
            .abbreviation::<Acceleration>(AccelerationUnit::MeterPerSecondSquared, &Locale::invariant())
            .unwrap();
        assert_eq!(cache.population_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_first_lookups_populate_once() {
        let cache = Arc::new(AbbreviationCache::new(CountingSource::default()));
        let locale = Locale::new("nb-NO");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let locale = locale.clone();
                thread::spawn(move || {
                    cache
                        .abbreviation::<RotationalSpeed>(RotationalSpeedUnit::RevolutionPerMinute, &locale)
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "o/min");
        }
        assert_eq!(cache.population_count(), 1);
    }

    #[test]
    fn cache_starts_empty() {
        let cache = AbbreviationCache::new(NoAbbreviations);
        assert!(cache.is_empty());
        assert_eq!(cache.population_count(), 0);
    }
}
