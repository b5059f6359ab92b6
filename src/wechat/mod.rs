//! Protocol shim for the WeChat official-account webhook: the one-time URL
//! ownership handshake and the menu-click message exchange.

pub mod menu;
pub mod message;
pub mod signature;

pub use menu::{article_for_key, MenuArticle};
pub use message::{news_reply, parse, IncomingMessage};
