//! Browser automation over the Chrome DevTools protocol.

pub mod driver;
pub mod screenshot;
pub mod session;

pub use driver::PageDriver;
pub use screenshot::Screenshotter;
pub use session::BrowserSession;
