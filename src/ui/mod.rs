pub mod action_bar;
pub mod action_list;
pub mod item_render;
pub mod layout;
pub mod menu;

pub use action_bar::{ActionBar, BarCommand, BarItem};
pub use action_list::{AcceptMode, ActionList, Selection};
pub use layout::{Anchor, MenuLayout, MIN_MENU_WIDTH};
pub use menu::{CodeActionMenu, CommandExecutor, MenuDelegate, ShowOptions};
