// Indicator output, signal and countdown value objects
pub mod countdown;
pub mod frame;
pub mod levels;
pub mod request;
pub mod signal;

pub use countdown::CountdownState;
pub use frame::{Column, IndicatorFrame, columns};
pub use levels::{FibonacciLevel, FibonacciLevels, PriceLevel, SupportResistance};
pub use request::Indicator;
pub use signal::{SignalCategory, SignalEvent, SignalKind};
