use tabled::Table;

use crate::{
    cli::{check_unauthorized, confirm, photo_manager, report, spinner},
    countries, error,
    types::AlbumTableRow,
    utils, warning,
};

pub async fn list_albums(country_id: String) {
    let mut manager = photo_manager(&country_id).await;

    let pb = spinner("Fetching albums...");
    let lookup = manager.albums_with_images().await;
    pb.finish_and_clear();

    let albums = match lookup.error {
        Some(e) => error!("Cannot load albums. Err: {}", check_unauthorized(e)),
        None => lookup.data.unwrap_or_default(),
    };

    if albums.is_empty() {
        warning!("No albums for {} yet.", countries::display_name(&country_id));
        return;
    }

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

/// Creates an album from a list of image ids. Premium only.
pub async fn create_album(country_id: String, name: String, ids: String) {
    let ids = match utils::parse_ids(&ids) {
        Ok(ids) => ids,
        Err(e) => error!("{}", e),
    };

    let mut manager = photo_manager(&country_id).await;
    manager.selection_mut().extend(ids);

    let pb = spinner(format!("Creating album {}...", name.trim()));
    let result = manager.create_album(&name).await;
    pb.finish_and_clear();
    report(&mut manager, result);
}

/// Deletes an album together with its images.
pub async fn delete_album(country_id: String, album_id: i64, yes: bool) {
    if !confirm(
        &format!("Delete album {} and all of its images?", album_id),
        yes,
    ) {
        return;
    }

    let mut manager = photo_manager(&country_id).await;
    let pb = spinner("Deleting album...");
    let result = manager.delete_album(album_id).await;
    pb.finish_and_clear();
    report(&mut manager, result);
}
