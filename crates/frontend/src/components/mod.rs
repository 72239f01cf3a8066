pub mod callout_form;
pub mod callout_list;
pub mod map_view;
pub mod notification;
pub mod session_selector;
