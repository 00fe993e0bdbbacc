pub mod city_stats;
pub mod customize;
pub mod graph;
pub mod map;

pub use city_stats::city_stats_page;
pub use customize::{customize_page, CustomizeVm};
pub use graph::{graph_page, GraphVm};
pub use map::{map_page, MapVm};
