//! UI module - menus, HUD, upgrade menu and end screens.

mod end_screen;
mod hud;
mod plugin;
mod upgrade;

pub use end_screen::{close_after_hold, EndScreenTimer};
pub use hud::health_fraction;
pub use plugin::UiPlugin;
pub use upgrade::{item_rect, marker_top, MenuKeys, UpgradeMenu};
