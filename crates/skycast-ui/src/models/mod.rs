pub mod dashboard_model;

pub use dashboard_model::{DashboardModel, FetchState, SearchRequest, Tab, ViewState};
