pub mod prometheus_sink;
pub mod sink;
