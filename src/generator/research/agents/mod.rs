pub mod competitive_analyst;
pub mod financial_analyst;
pub mod market_analyst;
