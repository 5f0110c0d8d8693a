use tabled::Table;

use crate::{
    backend::Backend,
    cli::{check_unauthorized, load_backend, spinner},
    error, info, utils, warning,
};

/// Every photo of the user, grouped by year with the newest year first.
pub async fn timeline(year: Option<i32>) {
    let (backend, _) = load_backend().await;

    let pb = spinner("Fetching timeline...");
    let result = backend.all_pictures(year).await.map_err(check_unauthorized);
    pb.finish_and_clear();

    let images = match result {
        Ok(images) => images,
        Err(e) => error!("Cannot load timeline. Err: {}", e),
    };

    if images.is_empty() {
        warning!("No photos yet.");
        return;
    }

    for (year, images) in utils::group_by_year(images) {
        info!("{} ({} photo(s))", year, images.len());
        println!("{}", Table::new(utils::image_rows(&images)));
    }
}
