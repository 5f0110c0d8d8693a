use std::{io, path::PathBuf};

use tabled::Table;

use crate::{
    backend::HttpBackend,
    cli::{check_unauthorized, confirm, photo_manager, prompt, report, spinner},
    countries, error, info,
    management::{Filter, PhotoManager, read_upload_file},
    types::AlbumTableRow,
    utils, warning,
};

const HELP: &str = "\
Commands:
  years                   list years with photos
  albums                  list albums with images
  year <year>             show a year, again to hide it
  album <id>              show an album, again to hide it
  all                     show every photo, again to hide them
  clear                   hide photos
  show                    list photos under the current filter
  select <ids>            toggle photos in the selection
  unselect                clear the selection
  status                  filter, selection and totals
  delete                  delete the selected photos
  delete-year <year>      delete every photo of a year
  delete-all              delete every photo of the country
  create-album <name>     create an album from the selection (premium)
  delete-album <id>       delete an album and its photos
  upload <year> <files>   upload files for a year
  help                    this text
  quit                    leave";

/// Interactive session over one country's photos.
///
/// Filter, selection and cached listings live as long as the session, so
/// repeated reads are served from the cache until an action changes data.
pub async fn manage(country_id: String) {
    let mut manager = photo_manager(&country_id).await;

    let pb = spinner("Loading...");
    manager.refresh_aggregate().await;
    pb.finish_and_clear();

    info!(
        "Managing photos of {}. Type help for commands.",
        countries::display_name(manager.country_id())
    );

    loop {
        let line = match prompt("photomap> ") {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => error!("Cannot read input. Err: {}", e),
        };

        let (command, args) = match line.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "years" => show_years(&mut manager).await,
            "albums" => show_albums(&mut manager).await,
            "year" => match args.parse::<i32>() {
                Ok(year) => announce(manager.toggle_year(year)),
                Err(_) => warning!("Usage: year <year>"),
            },
            "album" => match args.parse::<i64>() {
                Ok(album_id) => announce(manager.toggle_album(album_id)),
                Err(_) => warning!("Usage: album <id>"),
            },
            "all" => announce(manager.toggle_show_all()),
            "clear" => {
                manager.clear_filter();
                announce(manager.filter());
            }
            "show" => show_images(&mut manager).await,
            "select" => match utils::parse_ids(args) {
                Ok(ids) => {
                    for id in ids {
                        manager.selection_mut().toggle(id);
                    }
                    info!("{} image(s) selected", manager.selection().len());
                }
                Err(e) => warning!("{}", e),
            },
            "unselect" => {
                manager.selection_mut().clear();
                info!("Selection cleared");
            }
            "status" => show_status(&manager),
            "delete" => {
                let count = manager.selection().len();
                if count > 0 && !confirm(&format!("Delete {} image(s)?", count), false) {
                    continue;
                }
                let result = manager.delete_selected().await;
                report(&mut manager, result);
            }
            "delete-year" => match args.parse::<i32>() {
                Ok(year) => {
                    if confirm(&format!("Delete every photo from {}?", year), false) {
                        let result = manager.delete_year(year).await;
                        report(&mut manager, result);
                    }
                }
                Err(_) => warning!("Usage: delete-year <year>"),
            },
            "delete-all" => {
                if confirm("Delete ALL photos of this country?", false) {
                    let result = manager.delete_all().await;
                    report(&mut manager, result);
                }
            }
            "create-album" => {
                let result = manager.create_album(args).await;
                report(&mut manager, result);
            }
            "delete-album" => match args.parse::<i64>() {
                Ok(album_id) => {
                    if confirm(&format!("Delete album {} and its photos?", album_id), false) {
                        let result = manager.delete_album(album_id).await;
                        report(&mut manager, result);
                    }
                }
                Err(_) => warning!("Usage: delete-album <id>"),
            },
            "upload" => upload(&mut manager, args).await,
            other => warning!("Unknown command '{}'. Type help for commands.", other),
        }
    }
}

fn announce(filter: Filter) {
    match filter {
        Filter::NoFilter => info!("No filter, photos hidden"),
        Filter::YearSelected(year) => info!("Showing {}", year),
        Filter::AlbumSelected(album_id) => info!("Showing album {}", album_id),
        Filter::ShowAll => info!("Showing all photos"),
    }
}

async fn show_years(manager: &mut PhotoManager<HttpBackend>) {
    let lookup = manager.years().await;
    if let Some(e) = lookup.error {
        warning!("Cannot load years. Err: {}", check_unauthorized(e));
    }

    match lookup.data {
        Some(years) if !years.is_empty() => {
            let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
            info!("{}", listed.join(", "));
        }
        _ => warning!("No photos yet."),
    }
}

async fn show_albums(manager: &mut PhotoManager<HttpBackend>) {
    let lookup = manager.albums_with_images().await;
    if let Some(e) = lookup.error {
        warning!("Cannot load albums. Err: {}", check_unauthorized(e));
    }

    match lookup.data {
        Some(albums) if !albums.is_empty() => {
            let rows: Vec<AlbumTableRow> = albums
                .into_iter()
                .map(|a| AlbumTableRow {
                    id: a.id,
                    name: a.album_name,
                    images: a.number_of_images,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        _ => warning!("No albums yet."),
    }
}

async fn show_images(manager: &mut PhotoManager<HttpBackend>) {
    let Some(lookup) = manager.images().await else {
        info!("Pick a year, an album or all first.");
        return;
    };

    if let Some(e) = lookup.error {
        warning!("Cannot load photos. Err: {}", check_unauthorized(e));
    }

    match lookup.data {
        Some(images) if !images.is_empty() => {
            println!("{}", Table::new(utils::image_rows(&images)));
        }
        _ => warning!("No photos under this filter."),
    }
}

fn show_status(manager: &PhotoManager<HttpBackend>) {
    let aggregate = manager.aggregate().aggregate();
    announce(manager.filter());

    let selected: Vec<String> = manager
        .selection()
        .ids()
        .iter()
        .map(|id| id.to_string())
        .collect();
    if selected.is_empty() {
        info!("Nothing selected");
    } else {
        info!("Selected: {}", selected.join(", "));
    }

    info!(
        "{} photo(s) in {} countr{}, plan {}",
        aggregate.photo_count,
        aggregate.country_count,
        if aggregate.country_count == 1 { "y" } else { "ies" },
        if manager.is_premium() { "premium" } else { "basic" }
    );
}

async fn upload(manager: &mut PhotoManager<HttpBackend>, args: &str) {
    let mut parts = args.split_whitespace();
    let Some(year) = parts.next().and_then(|y| y.parse::<i32>().ok()) else {
        warning!("Usage: upload <year> <files>");
        return;
    };

    let mut files = Vec::new();
    for path in parts.map(PathBuf::from) {
        match read_upload_file(&path).await {
            Ok(file) => files.push(file),
            Err(e) => warning!("Skipping {}. Err: {}", path.display(), e),
        }
    }

    let pb = spinner(format!("Uploading {} file(s)...", files.len()));
    let result = manager.upload(files, year).await;
    pb.finish_and_clear();

    if let Some(upload) = report(manager, result) {
        for url in &upload.image_urls {
            info!("{}", url);
        }
    }
}
