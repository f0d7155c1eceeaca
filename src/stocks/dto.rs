use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StockItem {
    pub symbol: &'static str,
    pub price: f64,
}
