//! Selection policy for pickers: bounds, disabled days, custom predicates.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{CalendarError, NEAREST_SEARCH_HORIZON, PersianDate, PersianDateRange};

type Predicate = Arc<dyn Fn(&PersianDate) -> bool + Send + Sync>;

/// Immutable set of rules deciding which dates a picker may select.
///
/// Cloning is cheap: the disabled set and predicate are shared.
#[derive(Clone, Default)]
pub struct DateConstraints {
    min:              Option<PersianDate>,
    max:              Option<PersianDate>,
    disabled:         Arc<BTreeSet<PersianDate>>,
    predicate:        Option<Predicate>,
    max_range_length: Option<u32>,
}

impl fmt::Debug for DateConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateConstraints")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("disabled", &self.disabled)
            .field("predicate", &self.predicate.is_some())
            .field("max_range_length", &self.max_range_length)
            .finish()
    }
}

impl DateConstraints {
    /// Constraints that only bound the selectable interval.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRange` if both bounds are set and `min > max`.
    pub fn new(min: Option<PersianDate>, max: Option<PersianDate>) -> Result<Self, CalendarError> {
        let mut builder = Self::builder();
        builder.min = min;
        builder.max = max;
        builder.build()
    }

    pub fn builder() -> DateConstraintsBuilder {
        DateConstraintsBuilder::default()
    }

    pub const fn min(&self) -> Option<PersianDate> {
        self.min
    }

    pub const fn max(&self) -> Option<PersianDate> {
        self.max
    }

    pub fn disabled(&self) -> &BTreeSet<PersianDate> {
        &self.disabled
    }

    pub const fn max_range_length(&self) -> Option<u32> {
        self.max_range_length
    }

    fn within_bounds(&self, date: &PersianDate) -> bool {
        self.min.is_none_or(|min| *date >= min) && self.max.is_none_or(|max| *date <= max)
    }

    /// Whether a user may pick `date`.
    pub fn is_selectable(&self, date: &PersianDate) -> bool {
        self.within_bounds(date)
            && !self.disabled.contains(date)
            && self.predicate.as_ref().is_none_or(|predicate| predicate(date))
    }

    /// Clips `date` into `[min, max]`, ignoring disabled days and the predicate.
    pub fn clamp(&self, date: PersianDate) -> PersianDate {
        match (self.min, self.max) {
            (Some(min), _) if date < min => min,
            (_, Some(max)) if date > max => max,
            _ => date,
        }
    }

    /// Closest selectable date to `anchor`.
    ///
    /// The anchor is clamped first. The search then alternates one day later and one
    /// day earlier, so at equal distance the later date wins. Each direction stops at
    /// its bound, and the whole search gives up after `NEAREST_SEARCH_HORIZON` days.
    pub fn nearest_valid(&self, anchor: PersianDate) -> Option<PersianDate> {
        let start = self.clamp(anchor);
        if self.is_selectable(&start) {
            return Some(start);
        }

        let mut forward = Some(start);
        let mut backward = Some(start);
        for step in 1..=NEAREST_SEARCH_HORIZON {
            forward = forward
                .and_then(|date| date.succ())
                .filter(|date| self.within_bounds(date));
            if let Some(found) = forward.filter(|date| self.is_selectable(date)) {
                debug!(%anchor, %found, step, "nearest selectable date found after");
                return Some(found);
            }

            backward = backward
                .and_then(|date| date.pred())
                .filter(|date| self.within_bounds(date));
            if let Some(found) = backward.filter(|date| self.is_selectable(date)) {
                debug!(%anchor, %found, step, "nearest selectable date found before");
                return Some(found);
            }

            if forward.is_none() && backward.is_none() {
                trace!(%anchor, step, "both search directions left the bounds");
                break;
            }
        }

        debug!(%anchor, horizon = NEAREST_SEARCH_HORIZON, "no selectable date near anchor");
        None
    }

    /// Whether both ends are selectable and the range respects `max_range_length`.
    pub fn is_range_selectable(&self, range: &PersianDateRange) -> bool {
        self.is_selectable(&range.start())
            && self.is_selectable(&range.end())
            && self
                .max_range_length
                .is_none_or(|max| range.length_in_days() <= i64::from(max))
    }

    /// Latest end date a range starting at `start` may have, or `None` when unlimited.
    pub fn max_range_end(&self, start: PersianDate) -> Option<PersianDate> {
        let by_length = self
            .max_range_length
            .and_then(|max| start.plus_days(i64::from(max) - 1));
        match (by_length, self.max) {
            (Some(end), Some(max)) => Some(end.min(max)),
            (end, max) => end.or(max),
        }
    }

    /// Serializable view of these constraints. The predicate is not representable
    /// and is dropped.
    pub fn to_config(&self) -> ConstraintsConfig {
        ConstraintsConfig {
            min:              self.min,
            max:              self.max,
            disabled:         self.disabled.iter().copied().collect(),
            max_range_length: self.max_range_length,
        }
    }
}

/// Builder for [`DateConstraints`]; validation happens in [`build`](Self::build).
#[derive(Default)]
pub struct DateConstraintsBuilder {
    min:              Option<PersianDate>,
    max:              Option<PersianDate>,
    disabled:         BTreeSet<PersianDate>,
    predicate:        Option<Predicate>,
    max_range_length: Option<u32>,
}

impl DateConstraintsBuilder {
    #[must_use]
    pub fn min(mut self, date: PersianDate) -> Self {
        self.min = Some(date);
        self
    }

    #[must_use]
    pub fn max(mut self, date: PersianDate) -> Self {
        self.max = Some(date);
        self
    }

    #[must_use]
    pub fn disable(mut self, date: PersianDate) -> Self {
        self.disabled.insert(date);
        self
    }

    #[must_use]
    pub fn disable_all<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = PersianDate>,
    {
        self.disabled.extend(dates);
        self
    }

    /// Extra rule every selectable date must satisfy.
    #[must_use]
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&PersianDate) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Longest range, in days counting both ends, a range picker may select.
    #[must_use]
    pub fn max_range_length(mut self, days: u32) -> Self {
        self.max_range_length = Some(days);
        self
    }

    /// # Errors
    /// Returns `CalendarError::InvalidRange` if `min > max`, and
    /// `CalendarError::InvalidFormat` for a zero `max_range_length`.
    pub fn build(self) -> Result<DateConstraints, CalendarError> {
        if let (Some(start), Some(end)) = (self.min, self.max) {
            if start > end {
                debug!(%start, %end, "rejecting constraints with inverted bounds");
                return Err(CalendarError::InvalidRange { start, end });
            }
        }
        if self.max_range_length == Some(0) {
            return Err(CalendarError::InvalidFormat(
                "max range length must be at least one day".to_owned(),
            ));
        }

        debug!(
            min = ?self.min,
            max = ?self.max,
            disabled = self.disabled.len(),
            predicate = self.predicate.is_some(),
            "built date constraints"
        );
        Ok(DateConstraints {
            min:              self.min,
            max:              self.max,
            disabled:         Arc::new(self.disabled),
            predicate:        self.predicate,
            max_range_length: self.max_range_length,
        })
    }
}

/// Declarative form of [`DateConstraints`] for loading from configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstraintsConfig {
    pub min:              Option<PersianDate>,
    pub max:              Option<PersianDate>,
    pub disabled:         Vec<PersianDate>,
    pub max_range_length: Option<u32>,
}

impl TryFrom<ConstraintsConfig> for DateConstraints {
    type Error = CalendarError;

    fn try_from(config: ConstraintsConfig) -> Result<Self, Self::Error> {
        let mut builder = Self::builder().disable_all(config.disabled);
        builder.min = config.min;
        builder.max = config.max;
        builder.max_range_length = config.max_range_length;
        builder.build()
    }
}
