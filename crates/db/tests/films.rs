//! Integration tests for the film repository.
//!
//! Exercises the repository layer against a real database:
//! - Slug uniqueness on create and update
//! - Full replacement of vendors and gallery on update
//! - Delete removing every child and association row
//! - Publish/feature toggles
//! - Listing and highlights ranking

use assert_matches::assert_matches;
use sqlx::PgPool;
use vowreel_db::models::film::FilmInput;
use vowreel_db::models::gallery_image::GalleryImageInput;
use vowreel_db::models::vendor::VendorInput;
use vowreel_db::models::venue::VenueInput;
use vowreel_db::repositories::{FilmRepo, VenueRepo};
use vowreel_db::RepoError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_film(slug: &str, title: &str) -> FilmInput {
    FilmInput {
        slug: slug.to_string(),
        title: title.to_string(),
        subtitle: None,
        tagline: None,
        location: None,
        header_image: None,
        video_url: None,
        trailer_url: None,
        story_content: None,
        published: false,
        featured: false,
        sort_order: 0,
        rating: 0.0,
        vendors: vec![],
        gallery: vec![],
        venue_id: None,
    }
}

fn vendor(role: &str, name: &str) -> VendorInput {
    VendorInput {
        role: role.to_string(),
        name: name.to_string(),
        link: None,
    }
}

fn image(url: &str) -> GalleryImageInput {
    GalleryImageInput {
        url: url.to_string(),
        alt: None,
        storage_key: None,
    }
}

fn new_venue(slug: &str) -> VenueInput {
    VenueInput {
        slug: slug.to_string(),
        venue_title: slug.to_string(),
        short_description: None,
        expanded_text: None,
        address: None,
        phone: None,
        website: None,
        city: None,
        header_image: None,
        guest_capacity: None,
        catering: None,
        ceremony_options: vec![],
        amenities: vec![],
        price_from: None,
        price_notes: None,
        published: false,
        featured: false,
        gallery: vec![],
        film_ids: vec![],
    }
}

async fn count(pool: &PgPool, table: &str, film_id: i64) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE film_id = $1"))
        .bind(film_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Slug uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_on_create(pool: PgPool) {
    let first = FilmRepo::create(&pool, &new_film("anna-and-tom", "Anna & Tom"))
        .await
        .unwrap()
        .film;

    let err = FilmRepo::create(&pool, &new_film("anna-and-tom", "Someone Else"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::DuplicateSlug { entity: "Film", ref slug } if slug == "anna-and-tom");

    // First row is untouched.
    let stored = FilmRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Anna & Tom");
    assert_eq!(FilmRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_slug_collision(pool: PgPool) {
    let a = FilmRepo::create(&pool, &new_film("film-a", "A")).await.unwrap().film;
    FilmRepo::create(&pool, &new_film("film-b", "B")).await.unwrap();

    // Taking another row's slug fails.
    let err = FilmRepo::update(&pool, a.id, &new_film("film-b", "A"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::DuplicateSlug { .. });

    // Keeping its own slug is fine.
    let updated = FilmRepo::update(&pool, a.id, &new_film("film-a", "A renamed"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.row.film.title, "A renamed");
    assert_eq!(updated.previous_slug, "film-a");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_reports_previous_slug(pool: PgPool) {
    let film = FilmRepo::create(&pool, &new_film("old-slug", "Film")).await.unwrap().film;

    let updated = FilmRepo::update(&pool, film.id, &new_film("new-slug", "Film"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.previous_slug, "old-slug");
    assert_eq!(updated.row.film.slug, "new-slug");
    assert!(updated.row.film.updated_at >= film.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let result = FilmRepo::update(&pool, 999_999, &new_film("ghost", "Ghost"))
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_children(pool: PgPool) {
    let mut input = new_film("replace-me", "Replace");
    input.vendors = vec![vendor("Planner", "Old Planner"), vendor("Florist", "Old Florist")];
    input.gallery = vec![image("https://cdn.test/old.jpg")];
    let film = FilmRepo::create(&pool, &input).await.unwrap().film;

    input.vendors = vec![
        vendor("Photographer", "a"),
        vendor("Caterer", "b"),
        vendor("Band", "c"),
    ];
    input.gallery = vec![image("https://cdn.test/1.jpg"), image("https://cdn.test/2.jpg")];
    FilmRepo::update(&pool, film.id, &input).await.unwrap().unwrap();

    let detail = FilmRepo::find_detail_by_id(&pool, film.id).await.unwrap().unwrap();
    let names: Vec<_> = detail.vendors.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    let orders: Vec<_> = detail.vendors.iter().map(|v| v.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    let urls: Vec<_> = detail.gallery.iter().map(|g| g.url.as_str()).collect();
    assert_eq!(urls, vec!["https://cdn.test/1.jpg", "https://cdn.test/2.jpg"]);

    assert_eq!(count(&pool, "film_vendors", film.id).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_children_insert_nothing(pool: PgPool) {
    let film = FilmRepo::create(&pool, &new_film("bare", "Bare")).await.unwrap().film;

    let detail = FilmRepo::find_detail_by_id(&pool, film.id).await.unwrap().unwrap();
    assert!(detail.vendors.is_empty());
    assert!(detail.gallery.is_empty());
    assert!(detail.venue.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_children(pool: PgPool) {
    let venue = VenueRepo::create(&pool, &new_venue("the-old-mill")).await.unwrap().detail.venue;

    let mut input = new_film("to-delete", "Gone");
    input.vendors = vec![vendor("Planner", "P")];
    input.gallery = vec![image("https://cdn.test/x.jpg")];
    input.venue_id = Some(venue.id);
    let film = FilmRepo::create(&pool, &input).await.unwrap().film;

    let deleted = FilmRepo::delete(&pool, film.id).await.unwrap();
    assert_eq!(deleted.map(|f| f.slug), Some("to-delete".to_string()));

    assert!(FilmRepo::find_detail_by_id(&pool, film.id).await.unwrap().is_none());
    assert_eq!(count(&pool, "film_vendors", film.id).await, 0);
    assert_eq!(count(&pool, "film_gallery_images", film.id).await, 0);
    assert_eq!(count(&pool, "venue_wedding_films", film.id).await, 0);

    // The venue survives without the film.
    let venue = VenueRepo::find_detail_by_id(&pool, venue.id).await.unwrap().unwrap();
    assert!(venue.films.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_returns_none(pool: PgPool) {
    assert!(FilmRepo::delete(&pool, 424_242).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Toggles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_published_twice_restores(pool: PgPool) {
    let film = FilmRepo::create(&pool, &new_film("toggle", "Toggle")).await.unwrap().film;
    assert!(!film.published);

    let once = FilmRepo::toggle_published(&pool, film.id).await.unwrap().unwrap();
    assert!(once.published);
    assert_eq!(once.featured, film.featured);
    assert!(once.updated_at >= film.updated_at);

    let twice = FilmRepo::toggle_published(&pool, film.id).await.unwrap().unwrap();
    assert!(!twice.published);
    assert!(twice.updated_at >= once.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_missing_returns_none(pool: PgPool) {
    assert!(FilmRepo::toggle_featured(&pool, 77).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_elena_and_lachlan_scenario(pool: PgPool) {
    let mut input = new_film("elena-and-lachlan", "Elena & Lachlan");
    input.published = true;
    input.sort_order = 1;
    input.vendors = vec![vendor("Planner", "Bloom Events"), vendor("Florist", "Wild Stems")];
    input.gallery = vec![image("https://cdn.test/films/elena-1.jpg")];
    let film = FilmRepo::create(&pool, &input).await.unwrap().film;

    let mut other = new_film("sam-and-jo", "Sam & Jo");
    other.published = true;
    other.sort_order = 1;
    FilmRepo::create(&pool, &other).await.unwrap();

    let detail = FilmRepo::find_detail_by_slug(&pool, "elena-and-lachlan")
        .await
        .unwrap()
        .unwrap();
    let vendors: Vec<_> = detail.vendors.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(vendors, vec!["Bloom Events", "Wild Stems"]);
    assert_eq!(detail.gallery.len(), 1);

    FilmRepo::toggle_featured(&pool, film.id).await.unwrap().unwrap();

    let listed = FilmRepo::list_published(&pool).await.unwrap();
    let slugs: Vec<_> = listed.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(slugs, vec!["elena-and-lachlan", "sam-and-jo"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_hides_unpublished(pool: PgPool) {
    let mut visible = new_film("visible", "Visible");
    visible.published = true;
    FilmRepo::create(&pool, &visible).await.unwrap();
    FilmRepo::create(&pool, &new_film("draft", "Draft")).await.unwrap();

    let public = FilmRepo::list_published(&pool).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].slug, "visible");
    assert_eq!(FilmRepo::list(&pool).await.unwrap().len(), 2);

    // Lookup by slug does not filter; handlers decide.
    assert!(FilmRepo::find_by_slug(&pool, "draft").await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_highlights_rank_featured_then_rating(pool: PgPool) {
    for (slug, rating, featured) in [("low", 2.0, false), ("high", 4.8, false), ("pinned", 1.0, true)] {
        let mut input = new_film(slug, slug);
        input.published = true;
        input.rating = rating;
        input.featured = featured;
        FilmRepo::create(&pool, &input).await.unwrap();
    }

    let highlights = FilmRepo::list_highlights(&pool, 2).await.unwrap();
    let slugs: Vec<_> = highlights.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(slugs, vec!["pinned", "high"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_film_venue_association(pool: PgPool) {
    let mill = VenueRepo::create(&pool, &new_venue("the-old-mill")).await.unwrap().detail.venue;
    let barn = VenueRepo::create(&pool, &new_venue("red-barn")).await.unwrap().detail.venue;

    let mut input = new_film("moving-film", "Moving");
    input.venue_id = Some(mill.id);
    let film = FilmRepo::create(&pool, &input).await.unwrap().film;
    let detail = FilmRepo::find_detail_by_id(&pool, film.id).await.unwrap().unwrap();
    assert_eq!(detail.venue.map(|v| v.slug), Some("the-old-mill".to_string()));

    // Re-pointing replaces the prior association.
    input.venue_id = Some(barn.id);
    FilmRepo::update(&pool, film.id, &input).await.unwrap().unwrap();
    let detail = FilmRepo::find_detail_by_id(&pool, film.id).await.unwrap().unwrap();
    assert_eq!(detail.venue.map(|v| v.slug), Some("red-barn".to_string()));
    assert_eq!(count(&pool, "venue_wedding_films", film.id).await, 1);

    // Clearing detaches.
    input.venue_id = None;
    FilmRepo::update(&pool, film.id, &input).await.unwrap().unwrap();
    let detail = FilmRepo::find_detail_by_id(&pool, film.id).await.unwrap().unwrap();
    assert!(detail.venue.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_venue_rolls_back_create(pool: PgPool) {
    let mut input = new_film("orphan", "Orphan");
    input.venue_id = Some(9_999);

    let err = FilmRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, RepoError::Database(_));

    // The parent insert was rolled back with the failed association.
    assert!(FilmRepo::find_by_slug(&pool, "orphan").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editing_film_keeps_its_place_at_venue(pool: PgPool) {
    let mut ids = Vec::new();
    for slug in ["a", "b", "c"] {
        ids.push(FilmRepo::create(&pool, &new_film(slug, slug)).await.unwrap().film.id);
    }
    let mut venue = new_venue("the-old-mill");
    venue.film_ids = ids.clone();
    let venue = VenueRepo::create(&pool, &venue).await.unwrap().detail.venue;

    let mut input = new_film("a", "A retitled");
    input.venue_id = Some(venue.id);
    let updated = FilmRepo::update(&pool, ids[0], &input).await.unwrap().unwrap();
    assert_eq!(updated.row.film.title, "A retitled");
    assert_eq!(updated.row.venue.map(|v| v.slug), Some("the-old-mill".to_string()));

    let detail = VenueRepo::find_detail_by_id(&pool, venue.id).await.unwrap().unwrap();
    let order: Vec<_> = detail.films.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);

    // Moving away and back appends.
    input.venue_id = None;
    FilmRepo::update(&pool, ids[0], &input).await.unwrap().unwrap();
    input.venue_id = Some(venue.id);
    FilmRepo::update(&pool, ids[0], &input).await.unwrap().unwrap();
    let detail = VenueRepo::find_detail_by_id(&pool, venue.id).await.unwrap().unwrap();
    let order: Vec<_> = detail.films.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_detail_with_children(pool: PgPool) {
    let venue = VenueRepo::create(&pool, &new_venue("barn")).await.unwrap().detail.venue;
    let mut input = new_film("with-kids", "Kids");
    input.vendors = vec![vendor("Planner", "P")];
    input.gallery = vec![image("https://cdn.test/k.jpg")];
    input.venue_id = Some(venue.id);

    let detail = FilmRepo::create(&pool, &input).await.unwrap();
    assert_eq!(detail.vendors.len(), 1);
    assert_eq!(detail.gallery[0].url, "https://cdn.test/k.jpg");
    assert_eq!(detail.venue.map(|v| v.slug), Some("barn".to_string()));
}
