use std::collections::BTreeSet;

use crate::types::ImageFilter;

/// Which images the photo manager is showing.
///
/// Being a single enum, at most one of year, album and "show all" can be
/// active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    NoFilter,
    YearSelected(i32),
    AlbumSelected(i64),
    ShowAll,
}

impl Filter {
    /// The listing to fetch, or `None` when nothing should be fetched.
    pub fn image_filter(&self) -> Option<ImageFilter> {
        match *self {
            Filter::NoFilter => None,
            Filter::YearSelected(year) => Some(ImageFilter::Year(year)),
            Filter::AlbumSelected(album_id) => Some(ImageFilter::Album(album_id)),
            Filter::ShowAll => Some(ImageFilter::All),
        }
    }

    pub fn selected_year(&self) -> Option<i32> {
        match *self {
            Filter::YearSelected(year) => Some(year),
            _ => None,
        }
    }

    pub fn selected_album(&self) -> Option<i64> {
        match *self {
            Filter::AlbumSelected(album_id) => Some(album_id),
            _ => None,
        }
    }

    pub fn is_show_all(&self) -> bool {
        matches!(self, Filter::ShowAll)
    }
}

#[derive(Debug, Default)]
pub struct FilterState {
    current: Filter,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Filter {
        self.current
    }

    /// Selects `year`, or goes back to no filter if it already was selected.
    pub fn toggle_year(&mut self, year: i32) -> Filter {
        self.current = match self.current {
            Filter::YearSelected(y) if y == year => Filter::NoFilter,
            _ => Filter::YearSelected(year),
        };
        self.current
    }

    pub fn toggle_album(&mut self, album_id: i64) -> Filter {
        self.current = match self.current {
            Filter::AlbumSelected(a) if a == album_id => Filter::NoFilter,
            _ => Filter::AlbumSelected(album_id),
        };
        self.current
    }

    pub fn toggle_show_all(&mut self) -> Filter {
        self.current = match self.current {
            Filter::ShowAll => Filter::NoFilter,
            _ => Filter::ShowAll,
        };
        self.current
    }

    pub fn clear(&mut self) {
        self.current = Filter::NoFilter;
    }
}

/// Image ids picked for a bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: i64) {
        self.ids.insert(id);
    }

    pub fn extend<I: IntoIterator<Item = i64>>(&mut self, ids: I) {
        self.ids.extend(ids);
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
