mod assistant;
mod inspector;
mod manual_view;
mod simulator;
mod system;
mod widgets;

pub use system::ui_system;
