//! External service connectors.
//!
//! All outbound integrations go through a connector trait so handlers stay
//! independent of the concrete provider and testable against fakes.

mod errors;
mod weather_service;

pub use errors::ConnectorError;
pub use weather_service::{OpenWeatherClient, WeatherConnector};
