//! Page interaction behaviours for the marketing site.
//!
//! Each module is independent of the chat widget and of each other, apart
//! from the shared timing helpers. Nothing here touches the terminal; the
//! page view feeds in scroll positions, keystrokes and `Instant`s.

pub mod animate;
pub mod observer;
pub mod portfolio;
pub mod scroll;
pub mod timing;
pub mod validate;

pub use animate::{CounterAnimation, Typewriter};
pub use observer::{Bounds, ObserverOptions, VisibilityObserver};
pub use portfolio::{PortfolioFilter, PortfolioItem};
pub use scroll::{ScrollEffects, ScrollState, ScrollThresholds};
pub use timing::{Debouncer, Throttle};
pub use validate::{CharacterCounter, FieldStatus, FormState, SubmitOutcome};
