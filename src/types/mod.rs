pub mod location;
pub mod weather_condition;
pub mod weather_reading;
