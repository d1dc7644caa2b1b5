//! Interactive widgets for the termbelt toolkit.
//!
//! Every widget runs the same synchronous loop: draw a block through the
//! console, block on one keystroke, interpret it, then either mutate state
//! and redraw (erasing the old block first) or finalize and return —
//! leaving the accepted frame on screen and recording the result as the
//! console's last input. Unrecognized keys are silently ignored; invalid
//! inputs fail before the first draw.

pub mod datepicker;
pub mod fileselect;
pub mod horizontal;
pub mod list;
pub mod menu;

pub use datepicker::DatePicker;
pub use fileselect::FileSelect;
pub use horizontal::HorizontalMenu;
pub use list::{print_list, render_list, Bullet, ListNode};
pub use menu::Menu;
