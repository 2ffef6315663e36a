pub mod detector;

pub use detector::SignalDetector;
