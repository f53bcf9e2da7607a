pub mod blog_posts;
pub mod films;
pub mod public;
pub mod uploads;
pub mod venues;
