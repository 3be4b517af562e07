mod controller;

pub use controller::{
    DEFAULT_HOLD, HighlightController, HighlightControllerBuilder, HighlightState,
};
