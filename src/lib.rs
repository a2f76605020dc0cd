//! playtint — playmode tint override for a creative-tool host.
//!
//! The host keeps its "playmode tint" preference in internal machinery this
//! crate never touches directly: all access goes through the [`host::Host`]
//! collaborator trait, and the [`bridge::TintBridge`] resolves the host's
//! internal symbols by name once per session, caches the handles, and exposes
//! stable get/set/toggle accessors on top.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use playtint::bridge::TintBridge;
//! use playtint::color::Rgba;
//! use playtint::host::mock::MockHost;
//!
//! let host = Arc::new(MockHost::new().with_record("Playmode tint", Rgba::BLACK));
//! let mut bridge = TintBridge::new(host, Rgba::new(0.95, 0.86, 1.0, 1.0));
//! bridge.initialize().unwrap();
//! assert!(bridge.set_tint(Rgba::new(0.5, 0.5, 0.5, 1.0)));
//! assert_eq!(bridge.tint(), Some(Rgba::new(0.5, 0.5, 0.5, 1.0)));
//! ```

pub mod bridge;
pub mod build_info;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
#[cfg(test)]
pub mod testsupport;
