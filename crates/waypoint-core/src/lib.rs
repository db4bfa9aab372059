//! # Signals, Scopes, and Components
//!
//! Waypoint's runtime is a small single-threaded reactive core. There are a
//! handful of pieces:
//!
//! - `Signal<T>`: observable value with keyed subscribers.
//! - `Scope` / `Dispose`: cleanup ownership. Disposing a component scope is
//!   what "unmount" means.
//! - `Scheduler`: the explicit deferred queue every re-render and history
//!   commit goes through.
//! - `Context`: typed ambient values handed down explicitly, each frame with
//!   its own scope.
//! - `Component` / `RenderCx`: render closures with order-based `remember`
//!   slots, re-rendered on the next `Scheduler::tick` after an invalidation.
//!
//! ## Signals
//!
//! ```rust
//! use waypoint_core::*;
//!
//! let count = signal(0);
//! let id = count.subscribe(|v| log::debug!("count = {v}"));
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! assert!(count.unsubscribe(id));
//! ```
//!
//! ## Components
//!
//! ```rust
//! use std::cell::Cell;
//! use waypoint_core::*;
//!
//! let ctx = Context::new(Scheduler::new());
//! let view = Component::mount(&ctx, |cx| {
//!     let clicks = cx.remember(|| Cell::new(0));
//!     clicks.set(clicks.get() + 1);
//!     format!("rendered {} time(s)", clicks.get())
//! });
//! assert_eq!(view.output().as_deref(), Some("rendered 1 time(s)"));
//!
//! view.unmount();
//! assert!(!view.is_mounted());
//! ```

pub mod component;
pub mod context;
pub mod effects;
pub mod scheduler;
pub mod scope;
pub mod signal;

pub use component::*;
pub use context::*;
pub use effects::*;
pub use scheduler::*;
pub use scope::*;
pub use signal::*;
