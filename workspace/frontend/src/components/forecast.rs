mod chart;
mod form;
mod sample;
mod table;
mod view;

pub use view::ForecastPage;
