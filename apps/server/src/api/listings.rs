use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use pricetrack_core::listings::{Listing, NewListing, PriceComparisonReport, PriceTimelineReport};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceDynamicQuery {
    product_id: String,
    marketplace_id: Option<String>,
    date_start: NaiveDate,
    date_end: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComparePricesQuery {
    product_id: Option<String>,
    date_start: NaiveDate,
    date_end: NaiveDate,
}

/// Report windows take an inclusive end date on the wire; internally all
/// ranges are half-open, so the end is shifted by one day here.
fn exclusive_window(
    date_start: NaiveDate,
    date_end: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let end = date_end
        .succ_opt()
        .ok_or_else(|| ApiError::BadRequest("Date end is out of range".to_string()))?;
    if end < date_start {
        return Err(ApiError::BadRequest(
            "Date end cannot be before date start".to_string(),
        ));
    }
    Ok((date_start, end))
}

async fn list_listings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Listing>>> {
    let listings = state.listing_service.get_listings()?;
    Ok(Json(listings))
}

async fn get_listing(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Listing>> {
    let listing = state.listing_service.get_listing(&id)?;
    Ok(Json(listing))
}

async fn create_listing(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewListing>,
) -> ApiResult<(StatusCode, Json<Listing>)> {
    let created = state.listing_service.create_listing(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn import_listings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<NewListing>>,
) -> ApiResult<(StatusCode, Json<Vec<Listing>>)> {
    let created = state.listing_service.create_listings(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_listing(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.listing_service.delete_listing(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn price_dynamic(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceDynamicQuery>,
) -> ApiResult<Json<Vec<PriceTimelineReport>>> {
    let (start, end) = exclusive_window(query.date_start, query.date_end)?;
    let reports = match query.marketplace_id {
        Some(marketplace_id) => vec![state.listing_service.price_dynamic_for_marketplace(
            &query.product_id,
            &marketplace_id,
            start,
            end,
        )?],
        None => state
            .listing_service
            .price_dynamic(&query.product_id, start, end)?,
    };
    Ok(Json(reports))
}

async fn compare_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ComparePricesQuery>,
) -> ApiResult<Json<Vec<PriceComparisonReport>>> {
    let (start, end) = exclusive_window(query.date_start, query.date_end)?;
    let reports = match query.product_id {
        Some(product_id) => vec![state
            .listing_service
            .compare_prices(&product_id, start, end)?],
        None => state.listing_service.compare_prices_all(start, end)?,
    };
    Ok(Json(reports))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/listings", get(list_listings).post(create_listing))
        .route("/listings/import", post(import_listings))
        .route("/listings/price-dynamic", get(price_dynamic))
        .route("/listings/compare-prices", get(compare_prices))
        .route("/listings/{id}", get(get_listing).delete(delete_listing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn window_end_becomes_exclusive() {
        let (start, end) = exclusive_window(d(1), d(10)).unwrap();
        assert_eq!(start, d(1));
        assert_eq!(end, d(11));
    }

    #[test]
    fn single_day_window_is_valid() {
        let (start, end) = exclusive_window(d(5), d(5)).unwrap();
        assert_eq!(start, d(5));
        assert_eq!(end, d(6));
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(exclusive_window(d(10), d(1)).is_err());
    }
}
