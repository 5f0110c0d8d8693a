use std::path::PathBuf;

use tabled::Table;

use crate::{
    backend::Backend,
    cli::{check_unauthorized, confirm, load_backend, photo_manager, report, spinner},
    countries, error, info,
    management::{AggregateStore, read_upload_file},
    success,
    types::{CountryTableRow, ImageFilter},
    utils, warning,
};

/// Lists visited countries with the photo and country totals.
pub async fn countries() {
    let (backend, _) = load_backend().await;

    let pb = spinner("Fetching visited countries...");
    let mut store = AggregateStore::new();
    let aggregate = store.refresh(&backend).await.clone();
    pb.finish_and_clear();

    info!(
        "{} photo(s) in {} countr{}",
        aggregate.photo_count,
        aggregate.country_count,
        if aggregate.country_count == 1 { "y" } else { "ies" }
    );

    if aggregate.countries_with_photos.is_empty() {
        warning!("No countries with photos yet. Upload some with photomap upload");
        return;
    }

    let rows: Vec<CountryTableRow> = aggregate
        .countries_with_photos
        .into_iter()
        .map(|c| CountryTableRow {
            code: c.id.to_uppercase(),
            name: c.name,
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Years with photos, for one country or across all of them.
pub async fn years(country: Option<String>) {
    let years = match country {
        Some(country_id) => {
            let mut manager = photo_manager(&country_id).await;
            let pb = spinner(format!(
                "Fetching years for {}...",
                countries::display_name(&country_id)
            ));
            let lookup = manager.years().await;
            pb.finish_and_clear();

            match lookup.error {
                Some(e) => error!("Cannot load years. Err: {}", check_unauthorized(e)),
                None => lookup.data.unwrap_or_default(),
            }
        }
        None => {
            let (backend, _) = load_backend().await;
            let pb = spinner("Fetching years...");
            let result = backend.available_years().await.map_err(check_unauthorized);
            pb.finish_and_clear();

            match result {
                Ok(years) => years,
                Err(e) => error!("Cannot load years. Err: {}", e),
            }
        }
    };

    if years.is_empty() {
        warning!("No photos yet.");
        return;
    }

    let mut years = years;
    years.sort_unstable_by(|a, b| b.cmp(a));
    let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    info!("{}", listed.join(", "));
}

/// Lists the photos of a country under one filter.
pub async fn photos(country_id: String, year: Option<i32>, album: Option<i64>, open: bool) {
    let filter = match (year, album) {
        (Some(_), Some(_)) => error!("Choose either --year or --album, not both."),
        (Some(y), None) => ImageFilter::Year(y),
        (None, Some(a)) => ImageFilter::Album(a),
        (None, None) => ImageFilter::All,
    };

    let mut manager = photo_manager(&country_id).await;
    let pb = spinner("Fetching photos...");
    let lookup = manager.images_for(filter).await;
    pb.finish_and_clear();

    let images = match lookup.error {
        Some(e) => error!("Cannot load photos. Err: {}", check_unauthorized(e)),
        None => lookup.data.unwrap_or_default(),
    };

    if images.is_empty() {
        warning!(
            "No photos for {} under this filter.",
            countries::display_name(&country_id)
        );
        return;
    }

    println!("{}", Table::new(utils::image_rows(&images)));

    if open {
        for image in &images {
            if let Err(e) = webbrowser::open(&image.url) {
                warning!("Cannot open {}. Err: {}", image.url, e);
            }
        }
    }
}

/// Uploads files from disk for a country and year.
pub async fn upload(country_id: String, year: i32, paths: Vec<PathBuf>) {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        match read_upload_file(path).await {
            Ok(file) => files.push(file),
            Err(e) => warning!("Skipping {}. Err: {}", path.display(), e),
        }
    }

    let mut manager = photo_manager(&country_id).await;
    let pb = spinner(format!("Uploading {} file(s)...", files.len()));
    let result = manager.upload(files, year).await;
    pb.finish_and_clear();

    if let Some(upload) = report(&mut manager, result) {
        for url in &upload.image_urls {
            info!("{}", url);
        }
    }
}

/// Deletes photos of a country: a set of ids, one year or all of them.
pub async fn delete(
    country_id: String,
    ids: Option<String>,
    year: Option<i32>,
    all: bool,
    yes: bool,
) {
    let mut manager = photo_manager(&country_id).await;
    let name = countries::display_name(&country_id);

    match (ids, year, all) {
        (Some(ids), None, false) => {
            let ids = match utils::parse_ids(&ids) {
                Ok(ids) => ids,
                Err(e) => error!("{}", e),
            };
            manager.selection_mut().extend(ids);
            let count = manager.selection().len();
            if count > 0 && !confirm(&format!("Delete {} image(s)?", count), yes) {
                return;
            }

            let pb = spinner("Deleting images...");
            let result = manager.delete_selected().await;
            pb.finish_and_clear();
            report(&mut manager, result);
        }
        (None, Some(year), false) => {
            if !confirm(&format!("Delete all images of {} from {}?", name, year), yes) {
                return;
            }

            let pb = spinner(format!("Deleting images from {}...", year));
            let result = manager.delete_year(year).await;
            pb.finish_and_clear();
            report(&mut manager, result);
        }
        (None, None, true) => {
            if !confirm(&format!("Delete ALL images of {}?", name), yes) {
                return;
            }

            let pb = spinner("Deleting all images...");
            let result = manager.delete_all().await;
            pb.finish_and_clear();
            report(&mut manager, result);
        }
        _ => error!("Choose exactly one of --ids, --year or --all."),
    }

    let aggregate = manager.aggregate().aggregate();
    if manager.aggregate().refreshes() > 0 {
        success!(
            "{} photo(s) left in {} countr{}",
            aggregate.photo_count,
            aggregate.country_count,
            if aggregate.country_count == 1 { "y" } else { "ies" }
        );
    }
}
