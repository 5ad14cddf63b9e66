use actix_web::{Either, HttpRequest, HttpResponse, http, web};
use log::{debug, info, warn};
use validator::Validate;

use crate::db::{REFERRER_SCAN_LIMIT, StoreError};
use crate::errors::AppError;
use crate::models::stats::Stats;
use crate::models::url::ShortenedUrl;
use crate::models::visit::Visit;
use crate::state::app_state::AppState;
use crate::structs::url_request::{ShortenRequest, ShortenResponse};
use crate::utils::client_ip::client_ip;
use crate::utils::long_url::normalize_long_url;
use crate::utils::short_id::{generate_short_id, is_valid_short_id};

/// Upper bound on generate-and-check rounds for a single request.
pub const MAX_SHORT_ID_ATTEMPTS: usize = 32;

type ShortenBody = Either<web::Json<ShortenRequest>, web::Form<ShortenRequest>>;

async fn find_record(app_state: &AppState, short_id: &str) -> Result<ShortenedUrl, AppError> {
    if !is_valid_short_id(short_id) {
        return Err(AppError::NotFound);
    }

    debug!("Looking for short ID: {}", short_id);
    app_state
        .store
        .find_by_short_id(short_id)
        .await?
        .ok_or(AppError::NotFound)
}

fn header_value(req: &HttpRequest, name: http::header::HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_default()
}

/// Create a shortened URL
///
/// 201 with the short url on success, 409 if the url is not http(s).
pub async fn shorten_url(
    app_state: web::Data<AppState>,
    body: Option<ShortenBody>,
    query: Option<web::Query<ShortenRequest>>,
) -> Result<HttpResponse, AppError> {
    // body first, then `?url=`; neither present means an empty url
    let from_body = body.map(|body| match body {
        Either::Left(web::Json(req)) | Either::Right(web::Form(req)) => req,
    });
    let req = from_body
        .filter(|req| !req.url.is_empty())
        .or_else(|| query.map(web::Query::into_inner))
        .unwrap_or_default();

    if req.validate().is_err() {
        return Err(AppError::InvalidUrl);
    }
    let long_url = normalize_long_url(&req.url).ok_or(AppError::InvalidUrl)?;

    // generate a short ID, see if it's in use, repeat until one isn't
    for _ in 0..MAX_SHORT_ID_ATTEMPTS {
        let short_id = generate_short_id();

        if app_state.store.short_id_exists(&short_id).await? {
            debug!("Short ID {} already taken, retrying", short_id);
            continue;
        }

        let shortened_url = ShortenedUrl::new(long_url.clone(), short_id.clone());
        match app_state.store.insert_url(&shortened_url).await {
            Ok(()) => {}
            // taken between the check and the insert
            Err(StoreError::DuplicateShortId(id)) => {
                warn!("Short ID {} was claimed concurrently, retrying", id);
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            "Created new short URL: {} -> {} (id: {})",
            short_id,
            long_url,
            shortened_url.id.to_hex()
        );

        return Ok(HttpResponse::Created().json(ShortenResponse {
            short_url: app_state.short_url(&short_id),
            long_url,
            short_id,
        }));
    }

    Err(AppError::ShortIdExhausted(MAX_SHORT_ID_ATTEMPTS))
}

/// Record the visit and redirect to the original URL
pub async fn redirect_short_url(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_id = path.into_inner();
    let record = find_record(&app_state, &short_id).await?;

    let ip = client_ip(&req);
    let visit = Visit::new(
        record.id,
        ip.clone(),
        header_value(&req, http::header::USER_AGENT),
        app_state.geo.country(&ip),
        header_value(&req, http::header::REFERER),
    );

    app_state.store.insert_visit(&visit).await?;
    debug!(
        "Recorded visit to {}: ip={} country={:?} referrer={:?} user_agent={:?}",
        short_id, visit.ip_address, visit.country, visit.referrer, visit.user_agent
    );

    info!("Redirecting from short ID {} to long URL: {}", short_id, record.long_url);
    Ok(HttpResponse::MovedPermanently()
        .append_header((http::header::LOCATION, record.long_url))
        .finish())
}

/// Visit statistics for a short URL
pub async fn short_url_stats(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_id = path.into_inner();
    let record = find_record(&app_state, &short_id).await?;

    let store = &app_state.store;
    let (total_visits, countries, referrers) = futures_util::try_join!(
        store.count_visits(&record.id),
        store.visits_by_country(&record.id),
        store.visits_by_referrer(&record.id, REFERRER_SCAN_LIMIT),
    )?;

    let stats = Stats {
        countries,
        referrers,
        total_visits,
    };

    info!("Rendered stats JSON for {}", short_id);
    Ok(HttpResponse::Ok().json(stats))
}
