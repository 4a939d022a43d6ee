mod status_bar;
mod track_view;

pub use status_bar::StatusBarWidget;
pub use track_view::TrackViewWidget;
