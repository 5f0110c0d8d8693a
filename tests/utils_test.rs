use photomap::types::Image;
use photomap::utils::*;

// Helper function to create a test image
fn create_test_image(id: i64, year: i32) -> Image {
    Image {
        id,
        url: format!("http://localhost:8092/uploads/{}.jpg", id),
        year,
        country_id: "pt".to_string(),
    }
}

#[test]
fn test_resolve_image_url_relative_paths() {
    let base = "http://localhost:8092";

    assert_eq!(
        resolve_image_url(base, "/uploads/a.jpg"),
        "http://localhost:8092/uploads/a.jpg"
    );
    assert_eq!(
        resolve_image_url(base, "uploads/a.jpg"),
        "http://localhost:8092/uploads/a.jpg"
    );
}

#[test]
fn test_resolve_image_url_keeps_absolute_paths() {
    let base = "http://localhost:8092";
    let s3 = "https://bucket.s3.eu-west-2.amazonaws.com/a.jpg";

    assert_eq!(resolve_image_url(base, s3), s3);
    assert_eq!(
        resolve_image_url(base, "http://cdn.example.com/a.jpg"),
        "http://cdn.example.com/a.jpg"
    );
}

#[test]
fn test_upload_year_bounds() {
    assert!(!is_valid_upload_year(FIRST_UPLOAD_YEAR - 1));
    assert!(is_valid_upload_year(FIRST_UPLOAD_YEAR));
    assert!(is_valid_upload_year(current_year()));
    assert!(!is_valid_upload_year(current_year() + 1));
}

#[test]
fn test_parse_ids() {
    assert_eq!(parse_ids("7,9").unwrap(), vec![7, 9]);
    assert_eq!(parse_ids(" 1, 2  3 ").unwrap(), vec![1, 2, 3]);
    assert!(parse_ids("").unwrap().is_empty());

    let err = parse_ids("1,abc").unwrap_err();
    assert!(err.contains("abc"));
}

#[test]
fn test_format_usd_scales() {
    assert_eq!(format_usd(2_500_000_000_000.0), "$2.50 Trillion");
    assert_eq!(format_usd(1_500_000_000.0), "$1.50 Billion");
    assert_eq!(format_usd(12_345_678.0), "$12.35 Million");

    // below a million the plain amount is grouped
    assert_eq!(format_usd(12_345.0), "$12,345");
    assert_eq!(format_usd(950.5), "$950.5");
}

#[test]
fn test_format_thousands() {
    assert_eq!(format_thousands(0.0), "0");
    assert_eq!(format_thousands(999.0), "999");
    assert_eq!(format_thousands(1_234_567.0), "1,234,567");
    assert_eq!(format_thousands(1_234.5), "1,234.5");
    assert_eq!(format_thousands(-1_000.0), "-1,000");
}

#[test]
fn test_format_percent_and_years() {
    assert_eq!(format_percent(3.14159), "3.1%");
    assert_eq!(format_percent(0.0), "0.0%");
    assert_eq!(format_years(72.456), "72.5 years");
}

#[test]
fn test_format_population() {
    assert_eq!(format_population(10_300_000), "10,300,000");
}

#[test]
fn test_local_time() {
    let time = local_time(3600).unwrap();

    // HH:MM:SS
    assert_eq!(time.len(), 8);
    assert_eq!(time.chars().filter(|c| *c == ':').count(), 2);

    // offsets beyond a day are rejected
    assert!(local_time(100_000).is_none());
}

#[test]
fn test_flights_url() {
    assert_eq!(
        flights_url("Buenos Aires"),
        "https://www.google.com/travel/flights?q=Flights+from+London+to+Buenos+Aires"
    );

    // accents and punctuation are percent-encoded
    assert_eq!(
        flights_url("Bogotá"),
        "https://www.google.com/travel/flights?q=Flights+from+London+to+Bogot%C3%A1"
    );
    assert_eq!(
        flights_url(" Washington, D.C. "),
        "https://www.google.com/travel/flights?q=Flights+from+London+to+Washington%2C+D.C."
    );
}

#[test]
fn test_storage_quota() {
    assert_eq!(storage_quota(true), "100GB");
    assert_eq!(storage_quota(false), "5GB");
}

#[test]
fn test_group_by_year_newest_first() {
    let images = vec![
        create_test_image(1, 2019),
        create_test_image(2, 2023),
        create_test_image(3, 2019),
        create_test_image(4, 2021),
    ];

    let groups = group_by_year(images);
    let years: Vec<i32> = groups.iter().map(|(y, _)| *y).collect();
    assert_eq!(years, vec![2023, 2021, 2019]);

    let ids_2019: Vec<i64> = groups[2].1.iter().map(|i| i.id).collect();
    assert_eq!(ids_2019, vec![1, 3]);
}

#[test]
fn test_image_rows() {
    let rows = image_rows(&[create_test_image(5, 2020)]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 5);
    assert_eq!(rows[0].country, "PT");
    assert!(rows[0].url.ends_with("/5.jpg"));
}

#[test]
fn test_country_names() {
    assert_eq!(photomap::countries::country_name("pt"), Some("Portugal"));
    assert_eq!(photomap::countries::country_name(" es "), Some("Spain"));
    assert_eq!(
        photomap::countries::country_name("TZ"),
        Some("Tanzania, United Republic of")
    );
    assert_eq!(photomap::countries::country_name("zz"), None);
    assert_eq!(photomap::countries::display_name("zz"), "zz");
}
