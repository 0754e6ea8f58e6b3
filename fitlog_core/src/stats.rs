//! Day and week statistics over stored entries.
//!
//! All bucketing uses local calendar days: a day runs from local midnight to
//! the next local midnight, both converted to UTC before querying the store.
//! Nothing here writes to the store.

use crate::store::EntryStore;
use crate::{
    DailyBucket, Dashboard, DayListing, Error, PieSlice, Result, WeeklySeries,
};
use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

/// Number of days in the rolling dashboard series
pub const WEEK_DAYS: u64 = 7;

/// Read-only statistics over an entry store, bucketed in time zone `Tz`
pub struct StatsAggregator<'a, S, Tz: TimeZone> {
    store: &'a S,
    tz: Tz,
}

impl<'a, S: EntryStore, Tz: TimeZone> StatsAggregator<'a, S, Tz> {
    pub fn new(store: &'a S, tz: Tz) -> Self {
        Self { store, tz }
    }

    /// Today's calendar date in the aggregator's time zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// UTC bounds `[start, end)` of the local calendar day `date`
    ///
    /// `end` is midnight of the following calendar day, so month and year
    /// rollover come from calendar arithmetic rather than adding seconds.
    pub fn day_range(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.local_midnight(date);
        let end = match date.succ_opt() {
            Some(next) => self.local_midnight(next),
            None => start + Duration::days(1),
        };
        (start, end)
    }

    fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(NaiveTime::MIN);
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            // Midnight falls in a DST gap: the day starts at the first valid local time
            LocalResult::None => (1..=24 * 60)
                .find_map(|minutes| {
                    self.tz
                        .from_local_datetime(&(naive + Duration::minutes(minutes)))
                        .earliest()
                })
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
        }
    }

    fn ensure_owner(&self, owner: &str) -> Result<()> {
        if self.store.owner_exists(owner)? {
            Ok(())
        } else {
            Err(Error::NotFound(owner.to_string()))
        }
    }

    /// Entries recorded on `day` (today if `None`) and their calorie total
    pub fn list_day(&self, owner: &str, day: Option<NaiveDate>) -> Result<DayListing> {
        self.ensure_owner(owner)?;

        let day = day.unwrap_or_else(|| self.today());
        let (start, end) = self.day_range(day);
        let entries = self.store.find_by_owner_and_range(owner, start, end)?;
        let total = entries.iter().map(|e| e.calories_burned).sum();

        tracing::debug!("{} has {} workouts on {}", owner, entries.len(), day);

        Ok(DayListing {
            todays_workouts: entries,
            total_calories_burnt: total,
        })
    }

    /// Dashboard summary relative to today's local date
    pub fn dashboard(&self, owner: &str) -> Result<Dashboard> {
        self.dashboard_on(owner, self.today())
    }

    /// Dashboard summary treating `today` as the current day
    pub fn dashboard_on(&self, owner: &str, today: NaiveDate) -> Result<Dashboard> {
        self.ensure_owner(owner)?;

        let (start, end) = self.day_range(today);
        let total_calories = self.store.sum_calories_by_owner_and_range(owner, start, end)?;
        let total_workouts = self.store.count_by_owner_and_range(owner, start, end)?;
        let average = if total_workouts > 0 {
            total_calories as f64 / total_workouts as f64
        } else {
            0.0
        };

        let pie_chart_data = self
            .store
            .sum_calories_grouped_by_category(owner, start, end)?
            .into_iter()
            .enumerate()
            .map(|(id, bucket)| PieSlice {
                id,
                value: bucket.total_calories,
                label: bucket.category,
            })
            .collect();

        let buckets = self.daily_series(owner, today, WEEK_DAYS)?;
        let weekly = WeeklySeries {
            weeks: buckets.iter().map(|b| b.date.day().to_string()).collect(),
            calories_burned: buckets.iter().map(|b| b.total_calories).collect(),
        };

        tracing::info!(
            "Dashboard for {} on {}: {} workouts, {} kcal",
            owner,
            today,
            total_workouts,
            total_calories
        );

        Ok(Dashboard {
            total_calories_burnt: total_calories,
            total_workouts,
            avg_calories_burnt_per_workout: average,
            total_weeks_calories_burnt: weekly,
            pie_chart_data,
        })
    }

    /// Calorie totals for the `days` calendar days ending at `last`, oldest first
    ///
    /// Days without entries are present with a total of zero.
    pub fn daily_buckets(&self, owner: &str, last: NaiveDate, days: u64) -> Result<Vec<DailyBucket>> {
        self.ensure_owner(owner)?;
        self.daily_series(owner, last, days)
    }

    fn daily_series(&self, owner: &str, last: NaiveDate, days: u64) -> Result<Vec<DailyBucket>> {
        let mut buckets = Vec::with_capacity(days as usize);

        for offset in (0..days).rev() {
            let Some(date) = last.checked_sub_days(Days::new(offset)) else {
                continue;
            };
            let (start, end) = self.day_range(date);
            let total_calories = self.store.sum_calories_by_owner_and_range(owner, start, end)?;
            buckets.push(DailyBucket {
                date,
                total_calories,
            });
        }

        Ok(buckets)
    }
}
