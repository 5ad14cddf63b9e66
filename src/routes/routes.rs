use actix_web::web;

use crate::handlers::health_handlers::{health_check, ping};
use crate::handlers::url_handlers::{redirect_short_url, short_url_stats, shorten_url};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping))
        .route("/health", web::get().to(health_check))
        // returns a new shortened URL
        .route("/urls/shorten", web::post().to(shorten_url))
        // returns stats as JSON
        .route("/urls/{short_id}/stats", web::get().to(short_url_stats))
        // records visit and redirects to full URL
        .route("/s/{short_id}", web::get().to(redirect_short_url));
}
