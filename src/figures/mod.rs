pub mod plotly;

pub use plotly::Figure;
