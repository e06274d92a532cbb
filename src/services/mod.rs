pub mod openweather;
pub mod params;
