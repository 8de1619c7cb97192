//! The three opt-in controls.
//!
//! Each control is an explicit state object: the host mounts it, feeds
//! it attribute changes, invokes activation, and renders from
//! `visible()`. At most one of the three is visible at a time:
//! Request while permission is undecided, Denied when permission is
//! denied or push is unsupported, Granted once permission is granted
//! and the panel is configured.

pub mod denied;
pub mod granted;
pub mod request;
pub use denied::*;
pub use granted::*;
pub use request::*;
