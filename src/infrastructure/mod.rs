pub mod csv_source;
pub mod mock;

pub use csv_source::CsvMarketDataService;
pub use mock::MockMarketDataService;
