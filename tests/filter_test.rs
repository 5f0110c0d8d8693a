use photomap::{
    management::{Filter, FilterState, Selection},
    types::ImageFilter,
};

// Helper to count how many of the exclusive views a filter has on
fn active_views(filter: Filter) -> usize {
    [
        filter.selected_year().is_some(),
        filter.selected_album().is_some(),
        filter.is_show_all(),
    ]
    .iter()
    .filter(|on| **on)
    .count()
}

#[test]
fn test_initial_state_is_no_filter() {
    let state = FilterState::new();
    assert_eq!(state.current(), Filter::NoFilter);
    assert_eq!(state.current().image_filter(), None);
}

#[test]
fn test_selecting_year_clears_other_views() {
    let mut state = FilterState::new();

    state.toggle_show_all();
    assert_eq!(state.toggle_year(2020), Filter::YearSelected(2020));

    state.toggle_album(3);
    assert_eq!(state.toggle_year(2021), Filter::YearSelected(2021));
    assert_eq!(state.current().selected_album(), None);
}

#[test]
fn test_reselecting_active_year_or_album_toggles_off() {
    let mut state = FilterState::new();

    state.toggle_year(2020);
    assert_eq!(state.toggle_year(2020), Filter::NoFilter);

    state.toggle_album(8);
    assert_eq!(state.toggle_album(8), Filter::NoFilter);
}

#[test]
fn test_switching_between_years_keeps_year_selected() {
    let mut state = FilterState::new();

    state.toggle_year(2020);
    assert_eq!(state.toggle_year(2019), Filter::YearSelected(2019));
}

#[test]
fn test_show_all_toggles() {
    let mut state = FilterState::new();

    assert_eq!(state.toggle_show_all(), Filter::ShowAll);
    assert_eq!(state.toggle_show_all(), Filter::NoFilter);

    state.toggle_year(2020);
    assert_eq!(state.toggle_show_all(), Filter::ShowAll);
    assert_eq!(state.current().selected_year(), None);
}

#[test]
fn test_at_most_one_view_for_any_sequence() {
    let mut state = FilterState::new();
    let steps: Vec<Box<dyn Fn(&mut FilterState) -> Filter>> = vec![
        Box::new(|s: &mut FilterState| s.toggle_year(2020)),
        Box::new(|s: &mut FilterState| s.toggle_album(1)),
        Box::new(|s: &mut FilterState| s.toggle_show_all()),
        Box::new(|s: &mut FilterState| s.toggle_year(2021)),
        Box::new(|s: &mut FilterState| s.toggle_year(2021)),
        Box::new(|s: &mut FilterState| s.toggle_show_all()),
        Box::new(|s: &mut FilterState| s.toggle_album(2)),
        Box::new(|s: &mut FilterState| s.toggle_show_all()),
    ];

    for step in steps {
        let filter = step(&mut state);
        assert!(active_views(filter) <= 1);
    }
}

#[test]
fn test_clear_returns_to_no_filter() {
    let mut state = FilterState::new();
    state.toggle_album(4);
    state.clear();
    assert_eq!(state.current(), Filter::NoFilter);
}

#[test]
fn test_image_filter_mapping() {
    assert_eq!(
        Filter::YearSelected(2020).image_filter(),
        Some(ImageFilter::Year(2020))
    );
    assert_eq!(
        Filter::AlbumSelected(5).image_filter(),
        Some(ImageFilter::Album(5))
    );
    assert_eq!(Filter::ShowAll.image_filter(), Some(ImageFilter::All));
}

#[test]
fn test_selection_toggle_and_ids() {
    let mut selection = Selection::new();

    assert!(selection.toggle(9));
    assert!(selection.toggle(7));
    assert!(!selection.toggle(9));
    selection.extend([3, 7]);

    // ids come back sorted and without duplicates
    assert_eq!(selection.ids(), vec![3, 7]);
    assert!(selection.contains(3));
    assert_eq!(selection.len(), 2);

    selection.clear();
    assert!(selection.is_empty());
}
