use axum::{routing::get, Json, Router};
use tracing::instrument;

use crate::{auth::extractors::CurrentUser, state::AppState, stocks::dto::StockItem};

const QUOTES: &[StockItem] = &[
    StockItem { symbol: "AAPL", price: 189.84 },
    StockItem { symbol: "MSFT", price: 415.26 },
    StockItem { symbol: "NVDA", price: 875.28 },
    StockItem { symbol: "TSLA", price: 171.05 },
    StockItem { symbol: "2330.TW", price: 780.0 },
];

pub fn stocks_routes() -> Router<AppState> {
    Router::new().route("/stocks", get(list_stocks))
}

#[instrument(skip_all)]
pub async fn list_stocks(_user: CurrentUser) -> Json<Vec<StockItem>> {
    Json(QUOTES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_serialize_as_symbol_and_price() {
        let json = serde_json::to_value(QUOTES).unwrap();
        assert_eq!(json[0], serde_json::json!({ "symbol": "AAPL", "price": 189.84 }));
        assert_eq!(json.as_array().map(Vec::len), Some(QUOTES.len()));
    }
}
