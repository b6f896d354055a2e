pub mod lookup_view;
pub mod runtime;
pub mod theme;
