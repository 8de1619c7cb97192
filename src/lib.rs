//! Client-side web push opt-in: three controls coordinate the
//! permission prompt, service worker registration, and syncing the
//! resulting push subscription to the server. The browser surface is
//! injected through [`platform::PushPlatform`].

pub mod bus;
pub mod controls;
pub mod key;
pub mod platform;
pub mod sync;
