use crate::{
    backend::Backend,
    countries,
    types::{CountryAggregate, CountryRef},
};

/// Header totals and the visited-countries list, shared by every view.
///
/// Never edited locally: `refresh` replaces it with what the backend reports.
#[derive(Debug, Default)]
pub struct AggregateStore {
    aggregate: CountryAggregate,
    refreshes: u64,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregate(&self) -> &CountryAggregate {
        &self.aggregate
    }

    /// Number of completed refreshes.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Re-fetches counts, visited countries and years concurrently.
    ///
    /// Each part degrades on its own: a failed request resets only that part
    /// to its empty value.
    pub async fn refresh<B: Backend + ?Sized>(&mut self, backend: &B) -> &CountryAggregate {
        let (counts, countries, years) = tokio::join!(
            backend.photo_counts(),
            backend.countries_with_photos(),
            backend.available_years()
        );

        let counts = counts.unwrap_or_default();
        let countries_with_photos = countries
            .unwrap_or_default()
            .into_iter()
            .map(|id| CountryRef {
                name: countries::display_name(&id),
                id,
            })
            .collect();

        self.aggregate = CountryAggregate {
            photo_count: counts.photo_count,
            country_count: counts.country_count,
            countries_with_photos,
            available_years: years.unwrap_or_default(),
        };
        self.refreshes += 1;
        &self.aggregate
    }

    /// Drops everything, as after a logout.
    pub fn reset(&mut self) {
        self.aggregate = CountryAggregate::default();
    }
}
